//! Structured diagnostic messages with severity, code, and location.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use enumgen_common::{Node, SourceLocation, Traverse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A structured diagnostic message.
///
/// Diagnostics are plain values: they carry a copied [`SourceLocation`]
/// rather than a syntax handle, so they can live inside cached stage outputs
/// and be re-reported on every run.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Where the problem was detected.
    pub location: SourceLocation,
}

impl Diagnostic {
    /// Creates a new warning diagnostic.
    pub fn warning(
        code: DiagnosticCode,
        message: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.severity, self.code, self.message, self.location
        )
    }
}

impl Traverse for Diagnostic {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![
            &self.severity as &dyn Traverse,
            &self.code,
            &self.message,
            &self.location,
        ])
    }
}
