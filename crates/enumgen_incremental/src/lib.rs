//! Memoizing stage primitives for incremental generation.
//!
//! A [`Stage`] maps each input item to zero or more outputs and remembers
//! the last committed run. On the next run an item whose input is equal to
//! the remembered one reuses its outputs ([`StepReason::Cached`]); a
//! recomputed item whose outputs equal the remembered ones is
//! [`StepReason::Unchanged`]. Pipelines built from stages implement
//! [`Pipeline`] and report per-stage [`TrackedSteps`] for the stage names a
//! caller asked to track.

#![warn(missing_docs)]

pub mod pipeline;
pub mod stage;
pub mod step;
pub mod tracked;
pub mod value;

pub use enumgen_common::DeepClone;
pub use pipeline::{Pipeline, RunOptions, RunResult};
pub use stage::{Evaluation, Stage};
pub use step::{RunStep, StepOutput, StepReason};
pub use tracked::TrackedSteps;
pub use value::TrackedValue;
