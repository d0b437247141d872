//! Configuration types deserialized from `enumgen.toml`.

use serde::Deserialize;

/// The top-level generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct GeneratorConfig {
    /// Fully-qualified names of the attributes the extractor classifies.
    #[serde(default)]
    pub attributes: AttributeConfig,
    /// Settings for emitted artifacts.
    #[serde(default)]
    pub output: OutputConfig,
    /// Settings for the incremental pipeline.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Fully-qualified attribute type names recognized during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// The marker attribute requesting generation for an enum.
    pub marker: String,
    /// The attribute marking an enum as a bit-flags combination.
    pub flags: String,
    /// The per-member display attribute (named argument `Name`).
    pub display: String,
    /// The per-member description attribute (single constructor argument).
    pub description: String,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            marker: "EnumGenerators.EnumExtensionsAttribute".to_string(),
            flags: "System.FlagsAttribute".to_string(),
            display: "System.ComponentModel.DataAnnotations.DisplayAttribute".to_string(),
            description: "System.ComponentModel.DescriptionAttribute".to_string(),
        }
    }
}

/// Settings for generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Emit the marker attribute declaration once per run.
    pub emit_attribute: bool,
    /// Suffix appended to every artifact hint name.
    pub hint_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            emit_attribute: true,
            hint_suffix: ".g.cs".to_string(),
        }
    }
}

/// Settings for the incremental pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Evaluate independent items of a stage on the rayon thread pool.
    pub parallel: bool,
    /// Stage names whose steps are recorded in every run result.
    pub track: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            track: Vec::new(),
        }
    }
}
