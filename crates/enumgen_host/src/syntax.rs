//! Handles to parsed declaration syntax.

use std::fmt;
use std::sync::Arc;

use enumgen_common::{HostObjectKind, Node, SourceLocation, Traverse};

#[derive(Debug)]
struct SyntaxData {
    kind: String,
    location: SourceLocation,
}

/// A host handle to a parsed syntax node.
///
/// Only the declaration kind and its location are exposed; the generator
/// never inspects syntax. Equality is identity.
#[derive(Clone)]
pub struct SyntaxNode(Arc<SyntaxData>);

impl SyntaxNode {
    /// Creates a node handle of the given kind, e.g. `EnumDeclaration`.
    pub fn new(kind: impl Into<String>, location: SourceLocation) -> Self {
        Self(Arc::new(SyntaxData {
            kind: kind.into(),
            location,
        }))
    }

    /// The syntax kind name.
    pub fn kind(&self) -> &str {
        &self.0.kind
    }

    /// The node's location, copied into a plain value.
    pub fn location(&self) -> SourceLocation {
        self.0.location.clone()
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SyntaxNode({} @ {})", self.0.kind, self.0.location)
    }
}

impl Traverse for SyntaxNode {
    fn node(&self) -> Node<'_> {
        Node::Host(HostObjectKind::SyntaxNode)
    }
}
