//! Two-run cache verification.

use enumgen_incremental::{DeepClone, Pipeline, RunOptions, RunStep, StepReason, TrackedSteps};

use crate::scan::scan_object_graph;
use crate::violation::CacheViolation;

/// Per-stage totals from a successful verification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageReport {
    /// The stage name.
    pub name: String,
    /// Steps recorded by each run.
    pub steps: usize,
    /// Outputs recorded by each run.
    pub outputs: usize,
    /// Second-run outputs reused without running the transform.
    pub cached: usize,
    /// Second-run outputs recomputed to an equal value.
    pub unchanged: usize,
    /// Distinct objects visited while scanning both runs' outputs.
    pub objects_scanned: usize,
}

/// The result of a successful verification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifyReport {
    /// One entry per tracked stage, sorted by stage name.
    pub stages: Vec<StageReport>,
}

impl VerifyReport {
    /// The report for `name`, if that stage was tracked.
    pub fn stage(&self, name: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.name == name)
    }
}

/// Runs `pipeline` on `input` and then on a deep copy of it, tracking the
/// given stages, and checks that the second run reused every output.
///
/// The pipeline should be freshly constructed; both runs share its memo.
pub fn verify<P>(
    pipeline: &mut P,
    input: &P::Input,
    tracked: &[&str],
) -> Result<VerifyReport, CacheViolation>
where
    P: Pipeline,
    P::Input: DeepClone,
{
    let options = RunOptions::new().track_all(tracked.iter().copied());
    let first = pipeline.run(input, &options);
    let copy = input.deep_clone();
    let second = pipeline.run(&copy, &options);
    compare_runs(&first.tracked_steps, &second.tracked_steps)
}

/// Like [`verify`], but panics with the violation.
///
/// Intended for tests.
pub fn assert_cacheable<P>(pipeline: &mut P, input: &P::Input, tracked: &[&str]) -> VerifyReport
where
    P: Pipeline,
    P::Input: DeepClone,
{
    match verify(pipeline, input, tracked) {
        Ok(report) => report,
        Err(violation) => panic!("pipeline is not cacheable: {violation}"),
    }
}

/// Compares the tracked steps of two runs over equal inputs.
///
/// Every output of both runs is scanned for host objects before any value
/// is compared.
pub fn compare_runs(
    first: &TrackedSteps,
    second: &TrackedSteps,
) -> Result<VerifyReport, CacheViolation> {
    let first_names: Vec<String> = first.names().map(str::to_string).collect();
    let second_names: Vec<String> = second.names().map(str::to_string).collect();
    if first_names != second_names {
        return Err(CacheViolation::TrackedStagesDiffer {
            first: first_names,
            second: second_names,
        });
    }
    if first_names.is_empty() {
        return Err(CacheViolation::NoTrackedSteps);
    }

    let mut report = VerifyReport::default();
    for (stage, first_steps) in first.iter() {
        let second_steps = second.get(stage).unwrap_or_default();
        let stage_report = compare_stage(stage, first_steps, second_steps)?;
        tracing::debug!(
            stage,
            steps = stage_report.steps,
            cached = stage_report.cached,
            unchanged = stage_report.unchanged,
            "stage verified"
        );
        report.stages.push(stage_report);
    }
    Ok(report)
}

fn compare_stage(
    stage: &str,
    first: &[RunStep],
    second: &[RunStep],
) -> Result<StageReport, CacheViolation> {
    if first.len() != second.len() {
        return Err(CacheViolation::StepCountMismatch {
            stage: stage.to_string(),
            first: first.len(),
            second: second.len(),
        });
    }
    for (step, (a, b)) in first.iter().zip(second).enumerate() {
        if a.outputs.len() != b.outputs.len() {
            return Err(CacheViolation::OutputCountMismatch {
                stage: stage.to_string(),
                step,
                first: a.outputs.len(),
                second: b.outputs.len(),
            });
        }
    }

    let mut objects_scanned = 0;
    for value in first.iter().chain(second).flat_map(|step| step.values()) {
        objects_scanned += scan_object_graph(value.as_traverse()).map_err(|violation| {
            CacheViolation::ForbiddenReference {
                stage: stage.to_string(),
                kind: violation.kind,
                path: violation.path,
            }
        })?;
    }

    let mut report = StageReport {
        name: stage.to_string(),
        steps: first.len(),
        outputs: 0,
        cached: 0,
        unchanged: 0,
        objects_scanned,
    };
    for (step, (a, b)) in first.iter().zip(second).enumerate() {
        for (output, (x, y)) in a.outputs.iter().zip(&b.outputs).enumerate() {
            if !x.value.dyn_eq(y.value.as_ref()) {
                return Err(CacheViolation::OutputMismatch {
                    stage: stage.to_string(),
                    step,
                    output,
                    first: format!("{:?}", x.value),
                    second: format!("{:?}", y.value),
                });
            }
            match y.reason {
                StepReason::Cached => report.cached += 1,
                StepReason::Unchanged => report.unchanged += 1,
                StepReason::Computed => {
                    return Err(CacheViolation::Recomputed {
                        stage: stage.to_string(),
                        step,
                        output,
                        reason: y.reason,
                    });
                }
            }
            report.outputs += 1;
        }
    }
    Ok(report)
}
