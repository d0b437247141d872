//! Content hashing for generated artifacts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::graph::{Node, Traverse};

/// A 128-bit content hash computed using XXH3.
///
/// Two artifacts with the same `ContentHash` are assumed to have identical
/// text. Used to fingerprint generated sources so hosts can skip rewriting
/// unchanged outputs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Computes a content hash from a byte slice using XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Computes a content hash of a UTF-8 string.
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}

impl Traverse for ContentHash {
    fn node(&self) -> Node<'_> {
        Node::Leaf
    }
}
