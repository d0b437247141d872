//! Reasons a pipeline fails cache verification.

use enumgen_common::HostObjectKind;
use enumgen_incremental::StepReason;

/// A cache-correctness failure found by comparing two runs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CacheViolation {
    /// Neither run recorded any tracked stage.
    #[error("no tracked stage recorded any steps")]
    NoTrackedSteps,

    /// The two runs recorded different sets of stages.
    #[error("tracked stages differ between runs: {first:?} vs {second:?}")]
    TrackedStagesDiffer {
        /// Stage names recorded by the first run.
        first: Vec<String>,
        /// Stage names recorded by the second run.
        second: Vec<String>,
    },

    /// A stage ran a different number of steps.
    #[error("stage '{stage}' ran {first} steps, then {second}")]
    StepCountMismatch {
        /// The stage name.
        stage: String,
        /// Steps in the first run.
        first: usize,
        /// Steps in the second run.
        second: usize,
    },

    /// A step produced a different number of outputs.
    #[error("stage '{stage}' step {step} produced {first} outputs, then {second}")]
    OutputCountMismatch {
        /// The stage name.
        stage: String,
        /// Index of the step.
        step: usize,
        /// Outputs in the first run.
        first: usize,
        /// Outputs in the second run.
        second: usize,
    },

    /// Corresponding outputs are not equal.
    #[error("stage '{stage}' step {step} output {output} changed: {first} vs {second}")]
    OutputMismatch {
        /// The stage name.
        stage: String,
        /// Index of the step.
        step: usize,
        /// Index of the output within the step.
        output: usize,
        /// Debug rendering of the first run's value.
        first: String,
        /// Debug rendering of the second run's value.
        second: String,
    },

    /// An output was equal but not reused on the second run.
    #[error("stage '{stage}' step {step} output {output} was {reason} on the second run")]
    Recomputed {
        /// The stage name.
        stage: String,
        /// Index of the step.
        step: usize,
        /// Index of the output within the step.
        output: usize,
        /// The reason reported by the second run.
        reason: StepReason,
    },

    /// An output retains a host object.
    #[error("stage '{stage}' output retains a {kind}: {}", path.join(" -> "))]
    ForbiddenReference {
        /// The stage name.
        stage: String,
        /// The kind of host object found.
        kind: HostObjectKind,
        /// Type names from the output down to the host object.
        path: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_recomputed() {
        let violation = CacheViolation::Recomputed {
            stage: "SourceOutput".to_string(),
            step: 2,
            output: 0,
            reason: StepReason::Computed,
        };
        assert_eq!(
            violation.to_string(),
            "stage 'SourceOutput' step 2 output 0 was computed on the second run"
        );
    }

    #[test]
    fn display_forbidden_reference() {
        let violation = CacheViolation::ForbiddenReference {
            stage: "InitialExtraction".to_string(),
            kind: HostObjectKind::Symbol,
            path: vec!["Leak".to_string(), "EnumSymbol".to_string()],
        };
        assert_eq!(
            violation.to_string(),
            "stage 'InitialExtraction' output retains a symbol: Leak -> EnumSymbol"
        );
    }

    #[test]
    fn display_stage_sets() {
        let violation = CacheViolation::TrackedStagesDiffer {
            first: vec!["A".to_string()],
            second: vec![],
        };
        assert_eq!(
            violation.to_string(),
            "tracked stages differ between runs: [\"A\"] vs []"
        );
    }
}
