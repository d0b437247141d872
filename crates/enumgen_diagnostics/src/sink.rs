//! Collects the diagnostics reported while a generator run skips enums.

use crate::diagnostic::Diagnostic;

/// Ordered diagnostic accumulator for one generator run.
///
/// Diagnostics live inside cached extraction outputs, so the generator
/// gathers them after the stages finish rather than from the workers. That
/// way a cached skip is re-reported on every run.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every diagnostic from `diags`, in order.
    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diags);
    }

    /// The number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Consumes the sink and returns the diagnostics in recording order.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl FromIterator<Diagnostic> for DiagnosticSink {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        let mut sink = Self::new();
        sink.extend(iter);
        sink
    }
}
