//! The enum extension generator pipeline.
//!
//! [`EnumGenerator`] wires extraction, filtering, and source emission into
//! three memoizing stages named [`INITIAL_EXTRACTION`], [`REMOVING_NULLS`]
//! and [`SOURCE_OUTPUT`], and implements
//! [`Pipeline`](enumgen_incremental::Pipeline) over a host
//! [`Compilation`](enumgen_host::Compilation).

#![warn(missing_docs)]

pub mod generator;
pub mod output;

pub use generator::{EnumGenerator, INITIAL_EXTRACTION, REMOVING_NULLS, SOURCE_OUTPUT};
pub use output::GeneratorOutput;
