//! Extraction of enum descriptors from host symbols.
//!
//! [`extract`] turns one host enum candidate into either an
//! [`EnumDescriptor`](enumgen_model::EnumDescriptor) or a skip, copying every
//! fact the generator needs into plain values so that no host handle
//! survives past this stage.

#![warn(missing_docs)]

pub mod extraction;
pub mod extractor;
mod members;
mod parents;

pub use extraction::Extraction;
pub use extractor::{extract, EXTENSION_CLASS_NAME, EXTENSION_CLASS_NAMESPACE};
