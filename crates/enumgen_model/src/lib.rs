//! Value-typed descriptors of enums selected for extension generation.
//!
//! A descriptor is everything the code generator needs to know about one
//! enum, copied out of the host's symbol model into plain owned values. Two
//! descriptors are equal exactly when they would produce the same generated
//! source, which is what lets the incremental pipeline reuse outputs across
//! runs.

#![warn(missing_docs)]

pub mod descriptor;
pub mod literal;
pub mod underlying;

pub use descriptor::{EnumDescriptor, EnumMember, ParentScope, ValueOption};
pub use literal::{escape_literal, unescape_literal};
pub use underlying::UnderlyingType;
