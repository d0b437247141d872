//! Source text generation for enum extension classes.
//!
//! The generator is a pure function of its descriptors: equal descriptors
//! always produce byte-identical text. [`ExtensionPlan`] holds the lookup
//! tables the emitter renders and can evaluate the generated helpers
//! directly, which is how the tests pin down the generated semantics.

#![warn(missing_docs)]

pub mod artifact;
pub mod attribute;
pub mod emit;
pub mod plan;
pub mod writer;

pub use artifact::{hint_name, SourceArtifact, DEFAULT_HINT_SUFFIX};
pub use attribute::{attribute_artifact, attribute_source, ATTRIBUTE_HINT_NAME};
pub use emit::{generate, generate_artifact};
pub use plan::ExtensionPlan;
pub use writer::SourceWriter;
