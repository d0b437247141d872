//! Immutable ordered sequences with structural equality.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::graph::{Node, Traverse};

/// An immutable, ordered sequence compared element by element.
///
/// Equality and hashing are derived from the elements in order, never from
/// identity and never as a set. There is no mutable access once built; a
/// changed sequence is a new value.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquatableVec<T>(Vec<T>);

impl<T> EquatableVec<T> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Default for EquatableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for EquatableVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for EquatableVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> FromIterator<T> for EquatableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a EquatableVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Traverse> Traverse for EquatableVec<T> {
    fn node(&self) -> Node<'_> {
        Node::Branch(self.0.iter().map(|item| item as &dyn Traverse).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_when_elements_equal() {
        let a: EquatableVec<String> = vec!["Red".to_string(), "Blue".to_string()].into();
        let b: EquatableVec<String> = ["Red", "Blue"].iter().map(|s| s.to_string()).collect();
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn order_sensitive() {
        let a: EquatableVec<&str> = vec!["Red", "Blue"].into();
        let b: EquatableVec<&str> = vec!["Blue", "Red"].into();
        assert_ne!(a, b);
    }

    #[test]
    fn deref_to_slice() {
        let a: EquatableVec<u8> = vec![1, 2, 3].into();
        assert_eq!(a.len(), 3);
        assert_eq!(a[1], 2);
        assert_eq!(a.iter().sum::<u8>(), 6);
    }

    #[test]
    fn serde_is_transparent() {
        let a: EquatableVec<u8> = vec![1, 2].into();
        assert_eq!(serde_json::to_string(&a).unwrap(), "[1,2]");
        let back: EquatableVec<u8> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(a, back);
    }
}
