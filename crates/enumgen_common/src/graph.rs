//! Explicit object-graph decomposition for cacheability checks.
//!
//! Every value that can flow out of a pipeline stage implements [`Traverse`],
//! exposing its child values so the verifier can walk the full graph without
//! runtime reflection. Host-owned handles report themselves as
//! [`Node::Host`] so that a stage output embedding one can be detected.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Categories of long-lived host objects that must never be retained by a
/// stage output.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum HostObjectKind {
    /// A whole compilation handle.
    Compilation,
    /// A resolved semantic symbol.
    Symbol,
    /// A parsed syntax node.
    SyntaxNode,
}

impl fmt::Display for HostObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostObjectKind::Compilation => write!(f, "compilation"),
            HostObjectKind::Symbol => write!(f, "symbol"),
            HostObjectKind::SyntaxNode => write!(f, "syntax node"),
        }
    }
}

/// One step of a graph decomposition.
pub enum Node<'a> {
    /// A primitive, string, or enumerated constant. Traversal stops here.
    Leaf,
    /// A host-owned object of the given kind.
    Host(HostObjectKind),
    /// A composite value with the given children.
    Branch(Vec<&'a dyn Traverse>),
}

/// A value that can enumerate its child values.
pub trait Traverse {
    /// Decomposes this value into a [`Node`].
    fn node(&self) -> Node<'_>;

    /// Returns the concrete type name, used for identity tracking and
    /// violation paths.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! leaf_traverse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Traverse for $ty {
                fn node(&self) -> Node<'_> {
                    Node::Leaf
                }
            }
        )*
    };
}

leaf_traverse!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, String, str,
    (),
);

impl<T: Traverse> Traverse for Option<T> {
    fn node(&self) -> Node<'_> {
        match self {
            Some(value) => Node::Branch(vec![value as &dyn Traverse]),
            None => Node::Leaf,
        }
    }
}

impl<T: Traverse> Traverse for Vec<T> {
    fn node(&self) -> Node<'_> {
        Node::Branch(self.iter().map(|item| item as &dyn Traverse).collect())
    }
}

impl<T: Traverse> Traverse for Box<T> {
    fn node(&self) -> Node<'_> {
        let inner: &T = self;
        Node::Branch(vec![inner as &dyn Traverse])
    }
}

impl<T: Traverse> Traverse for Arc<T> {
    fn node(&self) -> Node<'_> {
        let inner: &T = self;
        Node::Branch(vec![inner as &dyn Traverse])
    }
}

impl<K: Traverse, V: Traverse> Traverse for BTreeMap<K, V> {
    fn node(&self) -> Node<'_> {
        let mut children: Vec<&dyn Traverse> = Vec::with_capacity(self.len() * 2);
        for (key, value) in self {
            children.push(key);
            children.push(value);
        }
        Node::Branch(children)
    }
}

impl<A: Traverse, B: Traverse> Traverse for (A, B) {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![&self.0 as &dyn Traverse, &self.1])
    }
}
