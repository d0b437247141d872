//! The enum descriptor and its parts.

use enumgen_common::{EquatableVec, Node, Traverse};
use serde::{Deserialize, Serialize};

use crate::underlying::UnderlyingType;

/// Per-member display metadata.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct ValueOption {
    /// Display name, already escaped for embedding in a string literal.
    pub display_name: Option<String>,
    /// `true` if no earlier member carries the same display name.
    pub is_first_presence: bool,
}

impl ValueOption {
    /// An option without display metadata.
    pub fn none() -> Self {
        Self::default()
    }

    /// An option with a display name.
    pub fn display(name: impl Into<String>, is_first_presence: bool) -> Self {
        Self {
            display_name: Some(name.into()),
            is_first_presence,
        }
    }
}

impl Traverse for ValueOption {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![&self.display_name as &dyn Traverse, &self.is_first_presence])
    }
}

/// One declared enum member.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EnumMember {
    /// The member identifier.
    pub name: String,
    /// The constant value, widened so every storage type fits.
    pub value: i128,
    /// Display metadata.
    pub option: ValueOption,
}

impl EnumMember {
    /// Creates a member without display metadata.
    pub fn new(name: impl Into<String>, value: i128) -> Self {
        Self {
            name: name.into(),
            value,
            option: ValueOption::none(),
        }
    }

    /// Replaces the member's display metadata.
    pub fn with_option(mut self, option: ValueOption) -> Self {
        self.option = option;
        self
    }
}

impl Traverse for EnumMember {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![&self.name as &dyn Traverse, &self.value, &self.option])
    }
}

/// One enclosing type the generated container must be nested inside.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ParentScope {
    /// Declaration keyword, e.g. `class` or `record struct`.
    pub keyword: String,
    /// Type name including type parameters, e.g. `Outer<T>`.
    pub name: String,
    /// Constraint clauses, empty when there are none.
    pub constraints: String,
}

impl ParentScope {
    /// Creates a parent scope.
    pub fn new(
        keyword: impl Into<String>,
        name: impl Into<String>,
        constraints: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            name: name.into(),
            constraints: constraints.into(),
        }
    }
}

impl Traverse for ParentScope {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![
            &self.keyword as &dyn Traverse,
            &self.name,
            &self.constraints,
        ])
    }
}

/// Everything needed to generate the extension class for one enum.
///
/// Equality is structural and member order is significant.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EnumDescriptor {
    /// Fully-qualified name of the source enum, e.g. `MyEnums.Colour`.
    pub name: String,
    /// Name of the generated extension class.
    pub extension_name: String,
    /// Namespace of the generated class; `None` is the global namespace.
    pub namespace: Option<String>,
    /// Storage type of the enum.
    pub underlying_type: UnderlyingType,
    /// Whether the enum is publicly accessible.
    pub is_public: bool,
    /// Whether the enum carries the flags marker.
    pub has_flags: bool,
    /// Members in declaration order.
    pub members: EquatableVec<EnumMember>,
    /// Enclosing types, outermost first.
    pub parents: EquatableVec<ParentScope>,
}

impl EnumDescriptor {
    /// Creates a descriptor for a public, non-flags `int` enum in the given
    /// namespace, with the default extension class name.
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        let name = name.into();
        let extension_name = default_extension_name(&name);
        Self {
            name,
            extension_name,
            namespace,
            underlying_type: UnderlyingType::Int,
            is_public: true,
            has_flags: false,
            members: EquatableVec::new(),
            parents: EquatableVec::new(),
        }
    }

    /// Returns the last segment of the fully-qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Returns `true` if any member carries a display name.
    pub fn is_display_metadata_used(&self) -> bool {
        self.members.iter().any(|m| m.option.display_name.is_some())
    }

    /// Returns the `<namespace>.<extension_name>` path of the generated class.
    pub fn qualified_extension_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.extension_name),
            None => self.extension_name.clone(),
        }
    }
}

impl Traverse for EnumDescriptor {
    fn node(&self) -> Node<'_> {
        Node::Branch(vec![
            &self.name as &dyn Traverse,
            &self.extension_name,
            &self.namespace,
            &self.underlying_type,
            &self.is_public,
            &self.has_flags,
            &self.members,
            &self.parents,
        ])
    }
}

/// Returns the last `.`-separated segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// The extension class name used when none is configured: `<Enum>Extensions`.
pub fn default_extension_name(qualified: &str) -> String {
    format!("{}Extensions", simple_name(qualified))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colour(members: Vec<EnumMember>) -> EnumDescriptor {
        let mut d = EnumDescriptor::new("MyEnums.Colour", Some("MyEnums".to_string()));
        d.members = members.into();
        d
    }

    #[test]
    fn defaults() {
        let d = EnumDescriptor::new("MyEnums.Colour", Some("MyEnums".to_string()));
        assert_eq!(d.simple_name(), "Colour");
        assert_eq!(d.extension_name, "ColourExtensions");
        assert_eq!(d.underlying_type, UnderlyingType::Int);
        assert_eq!(d.qualified_extension_name(), "MyEnums.ColourExtensions");
    }

    #[test]
    fn global_namespace_path() {
        let d = EnumDescriptor::new("Colour", None);
        assert_eq!(d.simple_name(), "Colour");
        assert_eq!(d.qualified_extension_name(), "ColourExtensions");
    }

    #[test]
    fn member_order_matters() {
        let a = colour(vec![EnumMember::new("Red", 0), EnumMember::new("Blue", 1)]);
        let b = colour(vec![EnumMember::new("Blue", 1), EnumMember::new("Red", 0)]);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn display_metadata_follows_members() {
        let plain = colour(vec![EnumMember::new("Red", 0)]);
        assert!(!plain.is_display_metadata_used());

        let labelled = colour(vec![
            EnumMember::new("Red", 0),
            EnumMember::new("Blue", 1).with_option(ValueOption::display("Azure", true)),
        ]);
        assert!(labelled.is_display_metadata_used());
    }

    #[test]
    fn descriptor_graph_has_no_host_objects() {
        fn walk(value: &dyn Traverse) -> usize {
            match value.node() {
                Node::Leaf => 1,
                Node::Host(_) => panic!("host object in descriptor"),
                Node::Branch(children) => children.into_iter().map(walk).sum(),
            }
        }
        let mut d = colour(vec![
            EnumMember::new("Red", 0).with_option(ValueOption::display("Rouge", true)),
        ]);
        d.parents = vec![ParentScope::new("class", "Outer<T>", "where T : new()")].into();
        assert!(walk(&d) > 0);
    }

    #[test]
    fn serializes_to_json() {
        let d = colour(vec![EnumMember::new("Red", 0)]);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["underlying_type"], "int");
        assert_eq!(json["members"][0]["name"], "Red");
    }
}
