//! The whole-compilation handle handed to the generator.

use std::fmt;
use std::sync::Arc;

use enumgen_common::{DeepClone, HostObjectKind, Node, SourceLocation, Traverse};
use serde::{Deserialize, Serialize};

use crate::symbol::{EnumSymbol, EnumSymbolData};
use crate::syntax::SyntaxNode;

/// Syntax kind recorded for every candidate built from [`DeclarationData`].
const ENUM_DECLARATION: &str = "EnumDeclaration";

/// One enum declaration found by the host, with its symbol if resolved.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EnumCandidate {
    /// The declaration syntax.
    pub syntax: SyntaxNode,
    /// The resolved symbol, or `None` when the host could not bind it.
    pub symbol: Option<EnumSymbol>,
}

impl EnumCandidate {
    /// Creates a candidate with fresh handles.
    pub fn new(location: SourceLocation, symbol: Option<EnumSymbolData>) -> Self {
        Self {
            syntax: SyntaxNode::new(ENUM_DECLARATION, location),
            symbol: symbol.map(EnumSymbol::new),
        }
    }

    /// Rebuilds this candidate with new handles around copies of its data.
    pub fn detached_copy(&self) -> Self {
        Self::new(
            self.syntax.location(),
            self.symbol.as_ref().map(|s| s.data().clone()),
        )
    }
}

impl DeepClone for EnumCandidate {
    fn deep_clone(&self) -> Self {
        self.detached_copy()
    }
}

impl Traverse for EnumCandidate {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![&self.syntax as &dyn Traverse, &self.symbol])
    }
}

/// Serializable form of a single declaration.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct DeclarationData {
    /// Where the declaration appears.
    #[serde(default)]
    pub location: SourceLocation,
    /// The resolved symbol, absent when unresolvable.
    #[serde(default)]
    pub symbol: Option<EnumSymbolData>,
}

/// Serializable form of a whole compilation.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct CompilationData {
    /// The name of the assembly being compiled.
    #[serde(default)]
    pub assembly_name: String,
    /// Every enum declaration, in source order.
    #[serde(default)]
    pub declarations: Vec<DeclarationData>,
}

struct CompilationInner {
    assembly_name: String,
    candidates: Vec<EnumCandidate>,
}

/// A host handle to an entire compilation.
///
/// Cloning shares the same compilation; use
/// [`detached_copy`](Self::detached_copy) to build an independent one.
#[derive(Clone)]
pub struct Compilation(Arc<CompilationInner>);

impl Compilation {
    /// Creates a compilation from already-built candidates.
    pub fn new(assembly_name: impl Into<String>, candidates: Vec<EnumCandidate>) -> Self {
        Self(Arc::new(CompilationInner {
            assembly_name: assembly_name.into(),
            candidates,
        }))
    }

    /// Creates a compilation from serializable data.
    pub fn from_data(data: CompilationData) -> Self {
        let candidates = data
            .declarations
            .into_iter()
            .map(|decl| EnumCandidate::new(decl.location, decl.symbol))
            .collect();
        Self::new(data.assembly_name, candidates)
    }

    /// The assembly name.
    pub fn assembly_name(&self) -> &str {
        &self.0.assembly_name
    }

    /// Every enum declaration, in source order.
    pub fn candidates(&self) -> &[EnumCandidate] {
        &self.0.candidates
    }

    /// Builds a structurally equal compilation that shares no handles with
    /// this one.
    pub fn detached_copy(&self) -> Self {
        Self::new(
            self.0.assembly_name.clone(),
            self.0.candidates.iter().map(EnumCandidate::detached_copy).collect(),
        )
    }
}

impl DeepClone for Compilation {
    fn deep_clone(&self) -> Self {
        self.detached_copy()
    }
}

impl PartialEq for Compilation {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Compilation {}

impl fmt::Debug for Compilation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compilation")
            .field("assembly_name", &self.0.assembly_name)
            .field("candidates", &self.0.candidates.len())
            .finish()
    }
}

impl Traverse for Compilation {
    fn node(&self) -> Node<'_> {
        Node::Host(HostObjectKind::Compilation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::{Accessibility, MemberSymbol};

    fn data() -> CompilationData {
        CompilationData {
            assembly_name: "Tests".to_string(),
            declarations: vec![
                DeclarationData {
                    location: SourceLocation::new("Colour.cs", 4, 1),
                    symbol: Some(EnumSymbolData {
                        name: "Colour".to_string(),
                        fully_qualified_name: "Colour".to_string(),
                        namespace: None,
                        containing_types: Vec::new(),
                        underlying_type: None,
                        accessibility: Accessibility::Public,
                        members: vec![MemberSymbol::new("Red", 0)],
                        attributes: Vec::new(),
                    }),
                },
                DeclarationData {
                    location: SourceLocation::new("Broken.cs", 1, 1),
                    symbol: None,
                },
            ],
        }
    }

    #[test]
    fn from_data_keeps_order() {
        let compilation = Compilation::from_data(data());
        assert_eq!(compilation.assembly_name(), "Tests");
        assert_eq!(compilation.candidates().len(), 2);
        assert!(compilation.candidates()[0].symbol.is_some());
        assert!(compilation.candidates()[1].symbol.is_none());
    }

    #[test]
    fn clone_shares_detached_copy_does_not() {
        let compilation = Compilation::from_data(data());
        let shared = compilation.clone();
        let detached = compilation.detached_copy();

        assert_eq!(compilation, shared);
        assert_eq!(compilation.candidates(), shared.candidates());

        assert_ne!(compilation, detached);
        assert_ne!(compilation.candidates()[0], detached.candidates()[0]);
        assert_eq!(
            compilation.candidates()[0].symbol.as_ref().map(|s| s.data()),
            detached.candidates()[0].symbol.as_ref().map(|s| s.data())
        );
        assert_eq!(
            compilation.candidates()[1].syntax.location(),
            detached.candidates()[1].syntax.location()
        );
    }

    #[test]
    fn deep_clone_detaches() {
        let compilation = Compilation::from_data(data());
        let copy = compilation.deep_clone();
        assert_ne!(compilation, copy);
        assert_eq!(copy.assembly_name(), "Tests");
        assert_eq!(copy.candidates().len(), 2);
    }

    #[test]
    fn compilation_is_host_object() {
        let compilation = Compilation::from_data(data());
        assert!(matches!(
            compilation.node(),
            Node::Host(HostObjectKind::Compilation)
        ));
    }

    #[test]
    fn json_roundtrip() {
        let json = serde_json::to_string(&data()).unwrap();
        let back: CompilationData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data());
    }
}
