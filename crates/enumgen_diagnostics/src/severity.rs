//! Diagnostic severity.

use enumgen_common::{Node, Traverse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity level of a diagnostic message.
///
/// Every generator diagnostic reports a skipped enum, so warnings are the
/// only level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// An enum was skipped; generation continues for everything else.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl Traverse for Severity {
    fn node(&self) -> Node<'_> {
        Node::Leaf
    }
}
