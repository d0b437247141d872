//! Value-typed source locations for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::{Node, Traverse};

/// A file position copied out of the host's syntax tree.
///
/// Unlike a syntax node handle, a `SourceLocation` is a plain value and is
/// safe to keep in cached stage outputs.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Path of the source file as reported by the host.
    pub path: String,
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
}

impl SourceLocation {
    /// Creates a new location.
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Returns `true` if the host did not supply a position.
    pub fn is_unknown(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            write!(f, "<unknown>")
        } else {
            write!(f, "{}:{}:{}", self.path, self.line, self.column)
        }
    }
}

impl Traverse for SourceLocation {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![&self.path as &dyn Traverse, &self.line, &self.column])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let loc = SourceLocation::new("src/Colour.cs", 4, 13);
        assert_eq!(loc.to_string(), "src/Colour.cs:4:13");
    }

    #[test]
    fn unknown_display() {
        assert_eq!(SourceLocation::default().to_string(), "<unknown>");
    }
}
