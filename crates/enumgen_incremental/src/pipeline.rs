//! The pipeline interface and per-run options.

use std::collections::BTreeSet;

use enumgen_common::CancellationToken;

use crate::tracked::TrackedSteps;

/// Options for a single pipeline run.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    tracked: BTreeSet<String>,
    cancel: CancellationToken,
}

impl RunOptions {
    /// Options tracking no stages, with a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in the steps of `stage`.
    pub fn track(mut self, stage: impl Into<String>) -> Self {
        self.tracked.insert(stage.into());
        self
    }

    /// Registers interest in several stages.
    pub fn track_all<S: Into<String>>(mut self, stages: impl IntoIterator<Item = S>) -> Self {
        self.tracked.extend(stages.into_iter().map(Into::into));
        self
    }

    /// Uses `cancel` to observe cancellation.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns `true` if `stage` is tracked.
    pub fn is_tracked(&self, stage: &str) -> bool {
        self.tracked.contains(stage)
    }

    /// Tracked stage names, sorted.
    pub fn tracked(&self) -> impl Iterator<Item = &str> {
        self.tracked.iter().map(String::as_str)
    }

    /// The cancellation token for the run.
    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// The result of one pipeline run.
#[derive(Debug)]
pub struct RunResult<O> {
    /// The pipeline's output.
    pub output: O,
    /// Steps of the tracked stages that ran.
    pub tracked_steps: TrackedSteps,
    /// `true` if the run observed cancellation and committed nothing.
    pub cancelled: bool,
}

/// A multi-stage generator that retains memoized state between runs.
///
/// Runs take `&mut self`, so one instance never runs concurrently with
/// itself.
pub trait Pipeline {
    /// The whole-run input.
    type Input;
    /// The whole-run output.
    type Output;

    /// Runs every stage on `input`, reusing the previous committed run where
    /// inputs are equal.
    fn run(&mut self, input: &Self::Input, options: &RunOptions) -> RunResult<Self::Output>;
}
