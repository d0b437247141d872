//! Cache-correctness verification for incremental pipelines.
//!
//! [`verify`] runs a pipeline twice, the second time on an independent deep
//! copy of the input, and checks that every tracked stage produced equal
//! outputs that were reused rather than recomputed from scratch. Every
//! output's object graph is also scanned so that a stage retaining a host
//! compilation, symbol, or syntax node is reported even when equality
//! happens to hold.

#![warn(missing_docs)]

pub mod scan;
pub mod verifier;
pub mod violation;

pub use scan::{scan_object_graph, GraphViolation};
pub use verifier::{assert_cacheable, compare_runs, verify, StageReport, VerifyReport};
pub use violation::CacheViolation;
