//! Diagnostic codes with category prefixes for structured identification.

use enumgen_common::{Node, Traverse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Warning diagnostics, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit number,
/// e.g. `W001`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// An attribute argument on the enum or one of its members could not be
    /// evaluated to a constant.
    pub const MALFORMED_ATTRIBUTE_ARGUMENT: DiagnosticCode =
        DiagnosticCode::new(Category::Warning, 1);

    /// The enum's storage type is not one of the integral types.
    pub const UNSUPPORTED_UNDERLYING_TYPE: DiagnosticCode =
        DiagnosticCode::new(Category::Warning, 2);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

impl Traverse for DiagnosticCode {
    fn node(&self) -> Node<'_> {
        Node::Leaf
    }
}
