//! The result of a generator run.

use enumgen_codegen::SourceArtifact;
use enumgen_diagnostics::Diagnostic;

/// Generated files and the diagnostics reported while producing them.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct GeneratorOutput {
    /// Generated files; the attribute file, when emitted, comes first.
    pub artifacts: Vec<SourceArtifact>,
    /// Warnings for enums that were skipped.
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratorOutput {
    /// Finds an artifact by hint name.
    pub fn artifact(&self, hint_name: &str) -> Option<&SourceArtifact> {
        self.artifacts.iter().find(|a| a.hint_name == hint_name)
    }

    /// Hint names of all artifacts, in output order.
    pub fn hint_names(&self) -> Vec<&str> {
        self.artifacts.iter().map(|a| a.hint_name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_hint_name() {
        let output = GeneratorOutput {
            artifacts: vec![
                SourceArtifact::new("A.g.cs", "a".to_string()),
                SourceArtifact::new("B.g.cs", "b".to_string()),
            ],
            diagnostics: Vec::new(),
        };
        assert_eq!(output.hint_names(), vec!["A.g.cs", "B.g.cs"]);
        assert_eq!(output.artifact("B.g.cs").map(|a| a.text.as_str()), Some("b"));
        assert!(output.artifact("C.g.cs").is_none());
    }
}
