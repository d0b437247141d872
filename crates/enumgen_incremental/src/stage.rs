//! A named, memoizing transformation stage.

use std::fmt;
use std::sync::Arc;

use enumgen_common::{CancellationToken, EnumgenResult, InternalError};
use rayon::prelude::*;

use crate::pipeline::RunOptions;
use crate::step::{RunStep, StepOutput, StepReason};
use crate::tracked::TrackedSteps;
use crate::value::TrackedValue;

type Transform<I, O> = dyn Fn(&I, &CancellationToken) -> Vec<O> + Send + Sync;

/// What a stage remembers about one item of its last committed run.
struct StepMemo<I, O> {
    input: I,
    outputs: Vec<Arc<O>>,
}

/// A pure per-item transformation with memoization across runs.
///
/// The transform may return zero outputs for an item, which makes
/// filtering an ordinary stage.
///
/// The memo is matched by position: item `k` is only ever compared with
/// item `k` of the previous run. When an upstream item starts or stops
/// producing outputs, every later item shifts and is recomputed even though
/// its own input is unchanged. Those recomputes still report `Unchanged`
/// when they reproduce the old outputs at the same position.
pub struct Stage<I, O> {
    name: String,
    transform: Box<Transform<I, O>>,
    parallel: bool,
    memo: Vec<StepMemo<I, O>>,
}

impl<I, O> Stage<I, O>
where
    I: Clone + PartialEq + Send + Sync,
    O: PartialEq + Send + Sync,
{
    /// Creates a stage. The transform must depend only on its input.
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&I, &CancellationToken) -> Vec<O> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transform: Box::new(transform),
            parallel: false,
            memo: Vec::new(),
        }
    }

    /// Enables or disables evaluating items on the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The stage name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The number of items remembered from the last committed run.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Evaluates every input item against the last committed run.
    ///
    /// Item `k` is compared with item `k` of the memo. Output order always
    /// follows input order. Items reached after cancellation produce no
    /// outputs and mark the evaluation cancelled.
    pub fn evaluate(&self, inputs: &[I], cancel: &CancellationToken) -> Evaluation<I, O> {
        let steps: Vec<EvaluatedStep<I, O>> = if self.parallel {
            inputs
                .par_iter()
                .enumerate()
                .map(|(k, input)| self.evaluate_item(k, input, cancel))
                .collect()
        } else {
            inputs
                .iter()
                .enumerate()
                .map(|(k, input)| self.evaluate_item(k, input, cancel))
                .collect()
        };

        let evaluation = Evaluation {
            stage: self.name.clone(),
            cancelled: steps.iter().any(|s| s.cancelled),
            steps,
        };
        tracing::debug!(
            stage = %self.name,
            items = inputs.len(),
            computed = evaluation.count(StepReason::Computed),
            cached = evaluation.count(StepReason::Cached),
            unchanged = evaluation.count(StepReason::Unchanged),
            cancelled = evaluation.cancelled,
            "stage evaluated"
        );
        evaluation
    }

    fn evaluate_item(
        &self,
        k: usize,
        input: &I,
        cancel: &CancellationToken,
    ) -> EvaluatedStep<I, O> {
        let previous = self.memo.get(k);
        if let Some(prev) = previous.filter(|prev| prev.input == *input) {
            return EvaluatedStep {
                input: input.clone(),
                outputs: prev.outputs.clone(),
                reason: StepReason::Cached,
                cancelled: false,
            };
        }
        if cancel.is_cancelled() {
            return EvaluatedStep {
                input: input.clone(),
                outputs: Vec::new(),
                reason: StepReason::Computed,
                cancelled: true,
            };
        }

        let outputs: Vec<Arc<O>> = (self.transform)(input, cancel)
            .into_iter()
            .map(Arc::new)
            .collect();
        let reason = match previous {
            Some(prev) if prev.outputs == outputs => StepReason::Unchanged,
            _ => StepReason::Computed,
        };
        EvaluatedStep {
            input: input.clone(),
            outputs,
            reason,
            cancelled: cancel.is_cancelled(),
        }
    }

    /// Replaces the memo with an evaluation of this stage.
    pub fn commit(&mut self, evaluation: Evaluation<I, O>) -> EnumgenResult<()> {
        if evaluation.stage != self.name {
            return Err(InternalError::new(format!(
                "evaluation of stage '{}' committed to stage '{}'",
                evaluation.stage, self.name
            )));
        }
        self.memo = evaluation
            .steps
            .into_iter()
            .map(|step| StepMemo {
                input: step.input,
                outputs: step.outputs,
            })
            .collect();
        Ok(())
    }

    /// Forgets the last committed run.
    pub fn reset(&mut self) {
        self.memo.clear();
    }
}

impl<I, O> fmt::Debug for Stage<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("name", &self.name)
            .field("parallel", &self.parallel)
            .field("memo", &self.memo.len())
            .finish()
    }
}

struct EvaluatedStep<I, O> {
    input: I,
    outputs: Vec<Arc<O>>,
    reason: StepReason,
    cancelled: bool,
}

/// The result of one [`Stage::evaluate`] call, not yet committed.
pub struct Evaluation<I, O> {
    stage: String,
    steps: Vec<EvaluatedStep<I, O>>,
    cancelled: bool,
}

impl<I, O> Evaluation<I, O> {
    /// The evaluated stage's name.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Returns `true` if any item observed cancellation.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The number of input items.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if there were no input items.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All outputs of all items, in input order.
    pub fn outputs(&self) -> impl Iterator<Item = &O> {
        self.steps
            .iter()
            .flat_map(|step| step.outputs.iter().map(Arc::as_ref))
    }

    /// Clones all outputs into a vector, in input order.
    pub fn to_outputs(&self) -> Vec<O>
    where
        O: Clone,
    {
        self.outputs().cloned().collect()
    }

    /// The number of outputs produced for the given reason.
    pub fn count(&self, reason: StepReason) -> usize {
        self.steps
            .iter()
            .filter(|step| step.reason == reason)
            .map(|step| step.outputs.len())
            .sum()
    }
}

impl<I, O: TrackedValue + 'static> Evaluation<I, O> {
    /// Converts the evaluated items into type-erased step records.
    pub fn run_steps(&self) -> Vec<RunStep> {
        self.steps
            .iter()
            .map(|step| RunStep {
                outputs: step
                    .outputs
                    .iter()
                    .map(|value| StepOutput {
                        value: Arc::clone(value) as Arc<dyn TrackedValue>,
                        reason: step.reason,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Records this evaluation into `tracked` if `options` tracks the stage.
    pub fn record_if_tracked(
        &self,
        options: &RunOptions,
        tracked: &mut TrackedSteps,
    ) -> EnumgenResult<()> {
        if options.is_tracked(&self.stage) {
            tracked.record(&self.stage, self.run_steps())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn doubling(calls: Arc<AtomicUsize>) -> Stage<u32, u64> {
        Stage::new("Double", move |x: &u32, _cancel: &CancellationToken| {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![u64::from(*x) * 2]
        })
    }

    fn reasons<I, O>(evaluation: &Evaluation<I, O>) -> Vec<StepReason> {
        evaluation.steps.iter().map(|s| s.reason).collect()
    }

    #[test]
    fn first_run_computes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = doubling(calls.clone());
        let eval = stage.evaluate(&[1, 2, 3], &CancellationToken::new());
        assert_eq!(eval.to_outputs(), vec![2, 4, 6]);
        assert_eq!(reasons(&eval), vec![StepReason::Computed; 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn equal_inputs_are_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = doubling(calls.clone());
        let cancel = CancellationToken::new();
        let first = stage.evaluate(&[1, 2], &cancel);
        stage.commit(first).unwrap();

        let second = stage.evaluate(&[1, 5], &cancel);
        assert_eq!(reasons(&second), vec![StepReason::Cached, StepReason::Computed]);
        assert_eq!(second.to_outputs(), vec![2, 10]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn equal_outputs_are_unchanged() {
        let mut stage: Stage<i32, bool> =
            Stage::new("IsPositive", |x: &i32, _: &CancellationToken| vec![*x > 0]);
        let cancel = CancellationToken::new();
        let first = stage.evaluate(&[1, -1], &cancel);
        stage.commit(first).unwrap();

        let second = stage.evaluate(&[7, 3], &cancel);
        assert_eq!(reasons(&second), vec![StepReason::Unchanged, StepReason::Computed]);
    }

    #[test]
    fn filtering_produces_no_outputs() {
        let stage: Stage<i32, i32> = Stage::new("Evens", |x: &i32, _: &CancellationToken| {
            if x % 2 == 0 {
                vec![*x]
            } else {
                Vec::new()
            }
        });
        let eval = stage.evaluate(&[1, 2, 3, 4], &CancellationToken::new());
        assert_eq!(eval.len(), 4);
        assert_eq!(eval.to_outputs(), vec![2, 4]);
        assert_eq!(eval.run_steps()[0].outputs.len(), 0);
    }

    #[test]
    fn parallel_keeps_input_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = doubling(calls).parallel(true);
        let inputs: Vec<u32> = (0..200).collect();
        let eval = stage.evaluate(&inputs, &CancellationToken::new());
        let expected: Vec<u64> = (0..200).map(|x| x * 2).collect();
        assert_eq!(eval.to_outputs(), expected);
    }

    #[test]
    fn cancellation_skips_remaining_items() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = doubling(calls.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let eval = stage.evaluate(&[1, 2], &cancel);
        assert!(eval.is_cancelled());
        assert!(eval.to_outputs().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cached_items_survive_cancellation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = doubling(calls);
        let first = stage.evaluate(&[1], &CancellationToken::new());
        stage.commit(first).unwrap();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let eval = stage.evaluate(&[1, 2], &cancel);
        assert_eq!(reasons(&eval), vec![StepReason::Cached, StepReason::Computed]);
        assert!(eval.is_cancelled());
        assert_eq!(eval.to_outputs(), vec![2]);
    }

    #[test]
    fn cached_outputs_share_the_memo_allocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut stage = doubling(calls);
        let cancel = CancellationToken::new();
        let first = stage.evaluate(&[4], &cancel);
        let first_ptr = Arc::as_ptr(&first.steps[0].outputs[0]);
        stage.commit(first).unwrap();

        let second = stage.evaluate(&[4], &cancel);
        assert!(std::ptr::eq(first_ptr, Arc::as_ptr(&second.steps[0].outputs[0])));
    }

    #[test]
    fn commit_rejects_foreign_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let other = doubling(calls.clone());
        let mut stage: Stage<u32, u64> =
            Stage::new("Other", |x: &u32, _: &CancellationToken| vec![u64::from(*x)]);
        let eval = other.evaluate(&[1], &CancellationToken::new());
        assert!(stage.commit(eval).is_err());
        assert_eq!(stage.memo_len(), 0);
    }

    #[test]
    fn tracked_recording() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stage = doubling(calls);
        let eval = stage.evaluate(&[1, 2], &CancellationToken::new());

        let mut tracked = TrackedSteps::new();
        eval.record_if_tracked(&RunOptions::new(), &mut tracked).unwrap();
        assert!(tracked.is_empty());

        eval.record_if_tracked(&RunOptions::new().track("Double"), &mut tracked)
            .unwrap();
        assert_eq!(tracked.get("Double").map(<[RunStep]>::len), Some(2));
        assert_eq!(tracked.count("Double", StepReason::Computed), 2);
    }
}
