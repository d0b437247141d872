//! Per-item step records.

use std::fmt;
use std::sync::Arc;

use crate::value::TrackedValue;

/// How a stage produced an item's outputs on this run.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StepReason {
    /// No usable previous result; the outputs are new.
    Computed,
    /// The input equalled the previous run's, so its outputs were reused
    /// without running the transform.
    Cached,
    /// The transform ran but produced outputs equal to the previous run's.
    Unchanged,
}

impl StepReason {
    /// Returns `true` for [`Cached`](Self::Cached) and
    /// [`Unchanged`](Self::Unchanged).
    pub fn is_reused(self) -> bool {
        matches!(self, StepReason::Cached | StepReason::Unchanged)
    }
}

impl fmt::Display for StepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepReason::Computed => write!(f, "computed"),
            StepReason::Cached => write!(f, "cached"),
            StepReason::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// One output of a step.
#[derive(Clone, Debug)]
pub struct StepOutput {
    /// The output value.
    pub value: Arc<dyn TrackedValue>,
    /// How the value was produced.
    pub reason: StepReason,
}

/// The record of one input item passing through one stage.
#[derive(Clone, Debug, Default)]
pub struct RunStep {
    /// The item's outputs in order; empty when the item was filtered out.
    pub outputs: Vec<StepOutput>,
}

impl RunStep {
    /// Iterates over the output values.
    pub fn values(&self) -> impl Iterator<Item = &dyn TrackedValue> {
        self.outputs.iter().map(|o| o.value.as_ref())
    }
}
