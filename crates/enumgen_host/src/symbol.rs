//! Resolved enum symbols as supplied by the host.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use enumgen_common::{HostObjectKind, Node, Traverse};
use serde::{Deserialize, Serialize};

use crate::attribute::{AttributeData, ConstantValue};

/// Declared accessibility of an enum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    /// `public`.
    Public,
    /// `internal`, the default for top-level types.
    #[default]
    Internal,
    /// `protected`.
    Protected,
    /// `protected internal`.
    ProtectedInternal,
    /// `private protected`.
    PrivateProtected,
    /// `private`.
    Private,
}

/// The kind of a type that encloses a nested enum.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// `class`.
    Class,
    /// `struct`.
    Struct,
    /// `record` (a record class).
    Record,
    /// `record struct`.
    RecordStruct,
    /// `interface`.
    Interface,
}

impl TypeKind {
    /// Returns the declaration keyword for this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Record => "record",
            TypeKind::RecordStruct => "record struct",
            TypeKind::Interface => "interface",
        }
    }
}

/// A type enclosing the enum declaration.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ContainingType {
    /// The declaration kind.
    pub kind: TypeKind,
    /// The simple type name, without type parameters.
    pub name: String,
    /// Declared type parameter names, in order.
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// The constraint clauses as written, e.g. `where T : new()`.
    #[serde(default)]
    pub constraints: String,
}

/// An enum member (field) of the symbol.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct MemberSymbol {
    /// The member name.
    pub name: String,
    /// The evaluated constant, or `None` for a field that is not a constant.
    #[serde(default)]
    pub constant: Option<ConstantValue>,
    /// Attributes applied to the member.
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

impl MemberSymbol {
    /// Creates a constant member with no attributes.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            constant: Some(ConstantValue::Signed(value)),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute to the member.
    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// The raw data of a resolved enum symbol.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct EnumSymbolData {
    /// The simple enum name.
    pub name: String,
    /// The fully-qualified display name, e.g. `MyTestEnums.Colour`.
    pub fully_qualified_name: String,
    /// The containing namespace, or `None` for the global namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Enclosing types, outermost first.
    #[serde(default)]
    pub containing_types: Vec<ContainingType>,
    /// The storage type name, e.g. `int` or `System.Byte`.
    #[serde(default)]
    pub underlying_type: Option<String>,
    /// Declared accessibility.
    #[serde(default)]
    pub accessibility: Accessibility,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
    /// Attributes applied to the enum.
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
}

/// A host handle to a resolved enum symbol.
///
/// Equality is identity: two handles are equal only if they refer to the
/// same symbol object, even when their data is identical.
#[derive(Clone)]
pub struct EnumSymbol(Arc<EnumSymbolData>);

impl EnumSymbol {
    /// Wraps symbol data in a fresh handle.
    pub fn new(data: EnumSymbolData) -> Self {
        Self(Arc::new(data))
    }

    /// Returns the underlying data.
    pub fn data(&self) -> &EnumSymbolData {
        &self.0
    }
}

impl Deref for EnumSymbol {
    type Target = EnumSymbolData;

    fn deref(&self) -> &EnumSymbolData {
        &self.0
    }
}

impl PartialEq for EnumSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EnumSymbol {}

impl fmt::Debug for EnumSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumSymbol({})", self.0.fully_qualified_name)
    }
}

impl Traverse for EnumSymbol {
    fn node(&self) -> Node<'_> {
        Node::Host(HostObjectKind::Symbol)
    }
}
