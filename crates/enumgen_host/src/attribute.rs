//! Attribute data attached to enum and member symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An integral constant as evaluated by the host.
///
/// Signed and unsigned values are kept apart so that the full `ulong` range
/// survives JSON transport.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// A value of a signed storage type, or any value that fits in `i64`.
    Signed(i64),
    /// A value above `i64::MAX`.
    Unsigned(u64),
}

impl ConstantValue {
    /// Widens the value to `i128`, which holds every integral enum value.
    pub fn as_i128(self) -> i128 {
        match self {
            ConstantValue::Signed(v) => i128::from(v),
            ConstantValue::Unsigned(v) => i128::from(v),
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Signed(v) => write!(f, "{v}"),
            ConstantValue::Unsigned(v) => write!(f, "{v}"),
        }
    }
}

/// A constant argument passed to an attribute constructor or property.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypedConstant {
    /// The `null` literal.
    Null,
    /// A string constant.
    String(String),
    /// An integral constant.
    Integer(ConstantValue),
    /// A boolean constant.
    Boolean(bool),
    /// A `typeof(...)` argument, carried as the type's display name.
    Type(String),
    /// The host failed to evaluate the argument to a constant.
    Error,
}

impl TypedConstant {
    /// Returns `true` if the host could not evaluate this argument.
    pub fn is_error(&self) -> bool {
        matches!(self, TypedConstant::Error)
    }

    /// Returns the textual form of the constant, or `None` for `null` and
    /// error arguments.
    pub fn value_text(&self) -> Option<String> {
        match self {
            TypedConstant::Null | TypedConstant::Error => None,
            TypedConstant::String(s) | TypedConstant::Type(s) => Some(s.clone()),
            TypedConstant::Integer(v) => Some(v.to_string()),
            TypedConstant::Boolean(true) => Some("True".to_string()),
            TypedConstant::Boolean(false) => Some("False".to_string()),
        }
    }
}

/// A named property assignment on an attribute, e.g. `Name = "Red"`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct NamedArgument {
    /// The property name.
    pub name: String,
    /// The assigned constant.
    pub value: TypedConstant,
}

/// One attribute application as resolved by the host.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct AttributeData {
    /// Fully-qualified display name of the attribute class, or `None` when
    /// the host could not bind the attribute.
    #[serde(default)]
    pub class: Option<String>,
    /// Positional constructor arguments.
    #[serde(default)]
    pub constructor_arguments: Vec<TypedConstant>,
    /// Named property assignments, in source order.
    #[serde(default)]
    pub named_arguments: Vec<NamedArgument>,
}

impl AttributeData {
    /// Creates an attribute application with no arguments.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            ..Self::default()
        }
    }

    /// Adds a positional constructor argument.
    pub fn with_argument(mut self, value: TypedConstant) -> Self {
        self.constructor_arguments.push(value);
        self
    }

    /// Adds a named property assignment.
    pub fn with_named(mut self, name: impl Into<String>, value: TypedConstant) -> Self {
        self.named_arguments.push(NamedArgument {
            name: name.into(),
            value,
        });
        self
    }

    /// Returns `true` if this attribute's class is `class_name`.
    pub fn is(&self, class_name: &str) -> bool {
        self.class.as_deref() == Some(class_name)
    }

    /// Returns the first named argument called `name`.
    pub fn named(&self, name: &str) -> Option<&TypedConstant> {
        self.named_arguments
            .iter()
            .find(|arg| arg.name == name)
            .map(|arg| &arg.value)
    }

    /// Returns `true` if any argument failed constant evaluation.
    pub fn has_error_argument(&self) -> bool {
        self.constructor_arguments.iter().any(TypedConstant::is_error)
            || self.named_arguments.iter().any(|arg| arg.value.is_error())
    }
}
