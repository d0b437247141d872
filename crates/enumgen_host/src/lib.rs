//! Input boundary between a host compiler and the enum extension generator.
//!
//! The host layer (outside this workspace) discovers enum declarations and
//! resolves their symbols. It hands them over as a [`Compilation`]: an
//! ordered list of [`EnumCandidate`]s, each pairing a [`SyntaxNode`] with an
//! optional resolved [`EnumSymbol`]. All raw data is serde-deserializable so
//! a host can supply it as JSON.
//!
//! The handle types compare by identity, like the host objects they stand
//! in for, and report themselves as host objects to the cache verifier.

#![warn(missing_docs)]

pub mod attribute;
pub mod compilation;
pub mod symbol;
pub mod syntax;

pub use attribute::{AttributeData, ConstantValue, NamedArgument, TypedConstant};
pub use compilation::{Compilation, CompilationData, DeclarationData, EnumCandidate};
pub use symbol::{Accessibility, ContainingType, EnumSymbol, EnumSymbolData, MemberSymbol, TypeKind};
pub use syntax::SyntaxNode;
