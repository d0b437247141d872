//! Step records captured for tracked stages.

use std::collections::BTreeMap;

use enumgen_common::{EnumgenResult, InternalError};

use crate::step::{RunStep, StepReason};

/// Stage name to the steps that stage recorded during one run.
///
/// Immutable once the run that produced it has returned.
#[derive(Clone, Debug, Default)]
pub struct TrackedSteps {
    stages: BTreeMap<String, Vec<RunStep>>,
}

impl TrackedSteps {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the steps of a stage. Each stage may be recorded once per run.
    pub fn record(&mut self, stage: &str, steps: Vec<RunStep>) -> EnumgenResult<()> {
        if self.stages.contains_key(stage) {
            return Err(InternalError::new(format!(
                "stage '{stage}' recorded twice in one run"
            )));
        }
        self.stages.insert(stage.to_string(), steps);
        Ok(())
    }

    /// The steps recorded for `stage`.
    pub fn get(&self, stage: &str) -> Option<&[RunStep]> {
        self.stages.get(stage).map(Vec::as_slice)
    }

    /// Recorded stage names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.keys().map(String::as_str)
    }

    /// Iterates over `(stage, steps)` pairs, sorted by stage name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RunStep])> {
        self.stages.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns `true` if no stage was recorded.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The number of recorded stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Counts outputs of `stage` by reason.
    pub fn count(&self, stage: &str, reason: StepReason) -> usize {
        self.get(stage)
            .unwrap_or_default()
            .iter()
            .flat_map(|step| &step.outputs)
            .filter(|output| output.reason == reason)
            .count()
    }
}
