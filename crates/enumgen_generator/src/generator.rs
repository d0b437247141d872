//! Stage wiring for the enum extension generator.

use std::path::Path;

use enumgen_codegen::{attribute_artifact, generate_artifact, SourceArtifact};
use enumgen_common::{CancellationToken, EnumgenResult};
use enumgen_config::{load_config, ConfigError, GeneratorConfig};
use enumgen_diagnostics::DiagnosticSink;
use enumgen_extract::{extract, Extraction};
use enumgen_host::{Compilation, EnumCandidate};
use enumgen_incremental::{Evaluation, Pipeline, RunOptions, RunResult, Stage, TrackedSteps};
use enumgen_model::EnumDescriptor;

use crate::output::GeneratorOutput;

/// Stage turning each candidate into an [`Extraction`].
pub const INITIAL_EXTRACTION: &str = "InitialExtraction";

/// Stage dropping skipped extractions.
pub const REMOVING_NULLS: &str = "RemovingNulls";

/// Stage emitting one source artifact per descriptor.
pub const SOURCE_OUTPUT: &str = "SourceOutput";

/// The incremental enum extension generator.
///
/// Holds each stage's memo between runs. Create one per host session and
/// run it on every compilation update.
#[derive(Debug)]
pub struct EnumGenerator {
    config: GeneratorConfig,
    extraction: Stage<EnumCandidate, Extraction>,
    filtering: Stage<Extraction, EnumDescriptor>,
    output: Stage<EnumDescriptor, SourceArtifact>,
}

impl EnumGenerator {
    /// Creates a generator with no memoized state.
    pub fn new(config: GeneratorConfig) -> Self {
        let parallel = config.pipeline.parallel;

        let attributes = config.attributes.clone();
        let extraction = Stage::new(
            INITIAL_EXTRACTION,
            move |candidate: &EnumCandidate, cancel: &CancellationToken| {
                vec![extract(candidate, &attributes, cancel)]
            },
        )
        .parallel(parallel);

        let filtering = Stage::new(
            REMOVING_NULLS,
            |extraction: &Extraction, _: &CancellationToken| -> Vec<EnumDescriptor> {
                extraction.descriptor().cloned().into_iter().collect()
            },
        )
        .parallel(parallel);

        let hint_suffix = config.output.hint_suffix.clone();
        let output = Stage::new(
            SOURCE_OUTPUT,
            move |descriptor: &EnumDescriptor, _: &CancellationToken| {
                vec![generate_artifact(descriptor, &hint_suffix)]
            },
        )
        .parallel(parallel);

        Self {
            config,
            extraction,
            filtering,
            output,
        }
    }

    /// Creates a generator configured from `enumgen.toml` in `project_dir`,
    /// falling back to defaults when the file is absent.
    pub fn from_project_dir(project_dir: &Path) -> Result<Self, ConfigError> {
        Ok(Self::new(load_config(project_dir)?))
    }

    /// The active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run options tracking the stages listed under `[pipeline] track`.
    pub fn default_run_options(&self) -> RunOptions {
        RunOptions::new().track_all(self.config.pipeline.track.iter().cloned())
    }

    /// Forgets all memoized state.
    pub fn reset(&mut self) {
        self.extraction.reset();
        self.filtering.reset();
        self.output.reset();
    }

    fn commit(
        &mut self,
        extracted: Evaluation<EnumCandidate, Extraction>,
        filtered: Evaluation<Extraction, EnumDescriptor>,
        generated: Evaluation<EnumDescriptor, SourceArtifact>,
    ) -> EnumgenResult<()> {
        self.extraction.commit(extracted)?;
        self.filtering.commit(filtered)?;
        self.output.commit(generated)?;
        Ok(())
    }
}

impl Default for EnumGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

fn record_tracked(
    options: &RunOptions,
    extracted: &Evaluation<EnumCandidate, Extraction>,
    filtered: &Evaluation<Extraction, EnumDescriptor>,
    generated: &Evaluation<EnumDescriptor, SourceArtifact>,
) -> EnumgenResult<TrackedSteps> {
    let mut tracked = TrackedSteps::new();
    extracted.record_if_tracked(options, &mut tracked)?;
    filtered.record_if_tracked(options, &mut tracked)?;
    generated.record_if_tracked(options, &mut tracked)?;
    Ok(tracked)
}

impl Pipeline for EnumGenerator {
    type Input = Compilation;
    type Output = GeneratorOutput;

    fn run(&mut self, input: &Compilation, options: &RunOptions) -> RunResult<GeneratorOutput> {
        let span = tracing::debug_span!(
            "enum_generator",
            assembly = %input.assembly_name(),
            candidates = input.candidates().len()
        );
        let _guard = span.enter();
        let cancel = options.cancel();

        let extracted = self.extraction.evaluate(input.candidates(), cancel);
        let extractions = extracted.to_outputs();
        let filtered = self.filtering.evaluate(&extractions, cancel);
        let descriptors = filtered.to_outputs();
        let generated = self.output.evaluate(&descriptors, cancel);

        let sink: DiagnosticSink = extractions
            .iter()
            .filter_map(Extraction::diagnostic)
            .cloned()
            .collect();

        let mut artifacts = Vec::with_capacity(generated.len() + 1);
        if self.config.output.emit_attribute {
            artifacts.push(attribute_artifact(&self.config.attributes.marker));
        }
        artifacts.extend(generated.outputs().cloned());

        let tracked_steps = match record_tracked(options, &extracted, &filtered, &generated) {
            Ok(tracked) => tracked,
            Err(err) => {
                tracing::error!(%err, "failed to record tracked steps");
                TrackedSteps::new()
            }
        };

        let cancelled = cancel.is_cancelled()
            || extracted.is_cancelled()
            || filtered.is_cancelled()
            || generated.is_cancelled();
        if cancelled {
            tracing::debug!("run cancelled; keeping previous memo");
        } else if let Err(err) = self.commit(extracted, filtered, generated) {
            tracing::error!(%err, "failed to commit stage memo");
            self.reset();
        }

        tracing::debug!(
            artifacts = artifacts.len(),
            diagnostics = sink.len(),
            "generator run complete"
        );
        RunResult {
            output: GeneratorOutput {
                artifacts,
                diagnostics: sink.into_diagnostics(),
            },
            tracked_steps,
            cancelled,
        }
    }
}
