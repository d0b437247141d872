//! The outcome of extracting one candidate.

use enumgen_common::{Node, Traverse};
use enumgen_diagnostics::Diagnostic;
use enumgen_model::EnumDescriptor;

/// Result of [`extract`](crate::extract) for one candidate.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Extraction {
    /// The candidate is marked for generation.
    Descriptor(EnumDescriptor),
    /// The candidate produces nothing, optionally with a diagnostic
    /// explaining why.
    Skipped(Option<Diagnostic>),
}

impl Extraction {
    /// A silent skip.
    pub fn skipped() -> Self {
        Extraction::Skipped(None)
    }

    /// Returns the descriptor, if any.
    pub fn descriptor(&self) -> Option<&EnumDescriptor> {
        match self {
            Extraction::Descriptor(d) => Some(d),
            Extraction::Skipped(_) => None,
        }
    }

    /// Consumes the extraction and returns the descriptor, if any.
    pub fn into_descriptor(self) -> Option<EnumDescriptor> {
        match self {
            Extraction::Descriptor(d) => Some(d),
            Extraction::Skipped(_) => None,
        }
    }

    /// Returns the skip diagnostic, if any.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Extraction::Skipped(diag) => diag.as_ref(),
            Extraction::Descriptor(_) => None,
        }
    }
}

impl Traverse for Extraction {
    fn node(&self) -> Node<'_> {
        match self {
            Extraction::Descriptor(d) => Node::Branch(vec![d as &dyn Traverse]),
            Extraction::Skipped(diag) => Node::Branch(vec![diag as &dyn Traverse]),
        }
    }
}
