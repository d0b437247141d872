//! Named generated-source artifacts.

use enumgen_common::{ContentHash, Node, Traverse};
use enumgen_model::EnumDescriptor;
use serde::{Deserialize, Serialize};

/// Suffix appended to hint names when none is configured.
pub const DEFAULT_HINT_SUFFIX: &str = ".g.cs";

/// One generated source file.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SourceArtifact {
    /// Stable file name the host registers the text under.
    pub hint_name: String,
    /// The generated text.
    pub text: String,
    /// Fingerprint of `text`.
    pub content_hash: ContentHash,
}

impl SourceArtifact {
    /// Creates an artifact, fingerprinting its text.
    pub fn new(hint_name: impl Into<String>, text: String) -> Self {
        let content_hash = ContentHash::from_text(&text);
        Self {
            hint_name: hint_name.into(),
            text,
            content_hash,
        }
    }
}

impl Traverse for SourceArtifact {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![
            &self.hint_name as &dyn Traverse,
            &self.text,
            &self.content_hash,
        ])
    }
}

/// The hint name for a descriptor's artifact:
/// `<namespace>.<extension_name><suffix>`, without the namespace when it
/// is global.
pub fn hint_name(descriptor: &EnumDescriptor, suffix: &str) -> String {
    format!("{}{suffix}", descriptor.qualified_extension_name())
}
