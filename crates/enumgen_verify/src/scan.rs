//! Object-graph scanning for retained host objects.

use std::collections::HashSet;
use std::fmt;

use enumgen_common::{HostObjectKind, Node, Traverse};

/// A host object found inside a value's object graph.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GraphViolation {
    /// The kind of host object.
    pub kind: HostObjectKind,
    /// Type names from the scanned root down to the host object.
    pub path: Vec<String>,
}

impl fmt::Display for GraphViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} reachable via {}", self.kind, self.path.join(" -> "))
    }
}

/// Walks every object reachable from `root`, failing on the first host
/// object.
///
/// Each distinct object, identified by address and concrete type, is
/// visited once. Returns the number of objects visited.
pub fn scan_object_graph(root: &dyn Traverse) -> Result<usize, GraphViolation> {
    let mut scanner = Scanner::default();
    scanner.walk(root)?;
    Ok(scanner.visited.len())
}

#[derive(Default)]
struct Scanner {
    visited: HashSet<(usize, &'static str)>,
    path: Vec<&'static str>,
}

impl Scanner {
    fn walk(&mut self, value: &dyn Traverse) -> Result<(), GraphViolation> {
        let type_name = value.type_name();
        let address = value as *const dyn Traverse as *const () as usize;
        if !self.visited.insert((address, type_name)) {
            return Ok(());
        }

        self.path.push(type_name);
        match value.node() {
            Node::Leaf => {}
            Node::Host(kind) => {
                return Err(GraphViolation {
                    kind,
                    path: self.path.iter().map(|name| short_type_name(name)).collect(),
                });
            }
            Node::Branch(children) => {
                for child in children {
                    self.walk(child)?;
                }
            }
        }
        self.path.pop();
        Ok(())
    }
}

/// Strips module paths from a type name, including inside generic
/// arguments: `alloc::vec::Vec<my::Item>` becomes `Vec<Item>`.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Handle;

    impl Traverse for Handle {
        fn node(&self) -> Node<'_> {
            Node::Host(HostObjectKind::SyntaxNode)
        }
    }

    struct Holder {
        name: String,
        items: Vec<Option<Handle>>,
    }

    impl Traverse for Holder {
        fn node(&self) -> Node<'_> {
            Node::Branch(vec![&self.name as &dyn Traverse, &self.items])
        }
    }

    #[test]
    fn plain_values_pass() {
        let value = vec![Some("a".to_string()), None];
        assert_eq!(scan_object_graph(&value), Ok(4));
    }

    #[test]
    fn shared_objects_are_visited_once() {
        let shared = Arc::new("x".to_string());
        let value = vec![shared.clone(), shared];
        assert_eq!(scan_object_graph(&value), Ok(4));
    }

    #[test]
    fn nested_host_object_is_found() {
        let holder = Holder {
            name: "h".to_string(),
            items: vec![None, Some(Handle)],
        };
        let violation = scan_object_graph(&holder).unwrap_err();
        assert_eq!(violation.kind, HostObjectKind::SyntaxNode);
        assert_eq!(
            violation.path,
            vec!["Holder", "Vec<Option<Handle>>", "Option<Handle>", "Handle"]
        );
        assert_eq!(
            violation.to_string(),
            "syntax node reachable via Holder -> Vec<Option<Handle>> -> Option<Handle> -> Handle"
        );
    }

    #[test]
    fn empty_holder_passes() {
        let holder = Holder {
            name: "h".to_string(),
            items: vec![None],
        };
        assert!(scan_object_graph(&holder).is_ok());
    }

    #[test]
    fn type_name_shortening() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("alloc::vec::Vec<core::option::Option<my_crate::Item>>"),
            "Vec<Option<Item>>"
        );
        assert_eq!(short_type_name("(u8, alloc::string::String)"), "(u8, String)");
    }
}
