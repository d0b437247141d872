//! Shared foundational types used across the enum extension generator.
//!
//! This crate provides content hashing, value-equatable sequences, the
//! object-graph decomposition used by the cache verifier, source locations,
//! cooperative cancellation, independent deep copies, and common result types.

#![warn(missing_docs)]

pub mod cancel;
pub mod deep;
pub mod graph;
pub mod hash;
pub mod location;
pub mod result;
pub mod seq;

pub use cancel::CancellationToken;
pub use deep::DeepClone;
pub use graph::{HostObjectKind, Node, Traverse};
pub use hash::ContentHash;
pub use location::SourceLocation;
pub use result::{EnumgenResult, InternalError};
pub use seq::EquatableVec;
