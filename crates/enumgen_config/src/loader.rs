//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;
use std::collections::HashSet;
use std::path::Path;

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE: &str = "enumgen.toml";

/// Loads and validates `enumgen.toml` from a project directory.
///
/// A missing file is not an error: the defaults are returned.
pub fn load_config(project_dir: &Path) -> Result<GeneratorConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(GeneratorConfig::default());
    }
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that attribute names are present and distinct.
fn validate_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    let attrs = &config.attributes;
    let named = [
        ("attributes.marker", &attrs.marker),
        ("attributes.flags", &attrs.flags),
        ("attributes.display", &attrs.display),
        ("attributes.description", &attrs.description),
    ];

    let mut seen = HashSet::new();
    for (field, value) in named {
        if value.trim().is_empty() {
            return Err(ConfigError::MissingField(field.to_string()));
        }
        if !seen.insert(value.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "{field} repeats attribute name '{value}'"
            )));
        }
    }

    if config.output.hint_suffix.is_empty() {
        return Err(ConfigError::MissingField("output.hint_suffix".to_string()));
    }
    if config.pipeline.track.iter().any(|name| name.is_empty()) {
        return Err(ConfigError::ValidationError(
            "pipeline.track contains an empty stage name".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[attributes]
marker = "Acme.GenerateExtensionsAttribute"
flags = "System.FlagsAttribute"
display = "Acme.LabelAttribute"
description = "Acme.NoteAttribute"

[output]
emit_attribute = false
hint_suffix = ".generated.cs"

[pipeline]
parallel = false
track = ["InitialExtraction", "RemovingNulls"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.attributes.marker, "Acme.GenerateExtensionsAttribute");
        assert_eq!(config.attributes.display, "Acme.LabelAttribute");
        assert!(!config.output.emit_attribute);
        assert_eq!(config.output.hint_suffix, ".generated.cs");
        assert!(!config.pipeline.parallel);
        assert_eq!(config.pipeline.track, vec!["InitialExtraction", "RemovingNulls"]);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let toml = r#"
[attributes]
marker = "Acme.GenerateExtensionsAttribute"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.attributes.marker, "Acme.GenerateExtensionsAttribute");
        assert_eq!(config.attributes.flags, "System.FlagsAttribute");
        assert!(config.output.emit_attribute);
    }

    #[test]
    fn empty_marker_errors() {
        let toml = r#"
[attributes]
marker = ""
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField(ref f) if f == "attributes.marker"));
    }

    #[test]
    fn duplicate_attribute_names_error() {
        let toml = r#"
[attributes]
display = "System.ComponentModel.DescriptionAttribute"
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn empty_track_name_errors() {
        let toml = r#"
[pipeline]
track = ["InitialExtraction", ""]
"#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = load_config_from_str("this is not valid toml {{{}}}").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[output]\nemit_attribute = false\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert!(!config.output.emit_attribute);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }
}
