//! Integral storage types an enum may declare.

use std::fmt;

use enumgen_common::{Node, Traverse};
use serde::{Deserialize, Serialize};

/// The integral type backing an enum's values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlyingType {
    /// 8-bit signed.
    SByte,
    /// 8-bit unsigned.
    Byte,
    /// 16-bit signed.
    Short,
    /// 16-bit unsigned.
    UShort,
    /// 32-bit signed, the default.
    #[default]
    Int,
    /// 32-bit unsigned.
    UInt,
    /// 64-bit signed.
    Long,
    /// 64-bit unsigned.
    ULong,
}

impl UnderlyingType {
    /// All storage types, narrowest first.
    pub const ALL: [UnderlyingType; 8] = [
        UnderlyingType::SByte,
        UnderlyingType::Byte,
        UnderlyingType::Short,
        UnderlyingType::UShort,
        UnderlyingType::Int,
        UnderlyingType::UInt,
        UnderlyingType::Long,
        UnderlyingType::ULong,
    ];

    /// The language keyword for this type.
    pub fn keyword(self) -> &'static str {
        match self {
            UnderlyingType::SByte => "sbyte",
            UnderlyingType::Byte => "byte",
            UnderlyingType::Short => "short",
            UnderlyingType::UShort => "ushort",
            UnderlyingType::Int => "int",
            UnderlyingType::UInt => "uint",
            UnderlyingType::Long => "long",
            UnderlyingType::ULong => "ulong",
        }
    }

    /// The runtime type name, e.g. `System.Int32`.
    pub fn system_name(self) -> &'static str {
        match self {
            UnderlyingType::SByte => "System.SByte",
            UnderlyingType::Byte => "System.Byte",
            UnderlyingType::Short => "System.Int16",
            UnderlyingType::UShort => "System.UInt16",
            UnderlyingType::Int => "System.Int32",
            UnderlyingType::UInt => "System.UInt32",
            UnderlyingType::Long => "System.Int64",
            UnderlyingType::ULong => "System.UInt64",
        }
    }

    /// Resolves a keyword or runtime type name.
    ///
    /// Accepts both spellings with or without a `global::` prefix. Returns
    /// `None` for anything that is not an integral enum storage type.
    pub fn from_type_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("global::").unwrap_or(name);
        Self::ALL
            .into_iter()
            .find(|ty| ty.keyword() == name || ty.system_name() == name)
    }

    /// Returns `true` for the signed types.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            UnderlyingType::SByte
                | UnderlyingType::Short
                | UnderlyingType::Int
                | UnderlyingType::Long
        )
    }

    /// The smallest and largest representable values.
    pub fn range(self) -> (i128, i128) {
        match self {
            UnderlyingType::SByte => (i8::MIN.into(), i8::MAX.into()),
            UnderlyingType::Byte => (0, u8::MAX.into()),
            UnderlyingType::Short => (i16::MIN.into(), i16::MAX.into()),
            UnderlyingType::UShort => (0, u16::MAX.into()),
            UnderlyingType::Int => (i32::MIN.into(), i32::MAX.into()),
            UnderlyingType::UInt => (0, u32::MAX.into()),
            UnderlyingType::Long => (i64::MIN.into(), i64::MAX.into()),
            UnderlyingType::ULong => (0, u64::MAX.into()),
        }
    }

    /// Returns `true` if `value` fits in this type.
    pub fn contains(self, value: i128) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }
}

impl fmt::Display for UnderlyingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Traverse for UnderlyingType {
    fn node(&self) -> Node<'_> {
        Node::Leaf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_both_spellings() {
        assert_eq!(UnderlyingType::from_type_name("int"), Some(UnderlyingType::Int));
        assert_eq!(
            UnderlyingType::from_type_name("System.UInt64"),
            Some(UnderlyingType::ULong)
        );
        assert_eq!(
            UnderlyingType::from_type_name("global::System.Byte"),
            Some(UnderlyingType::Byte)
        );
    }

    #[test]
    fn rejects_non_integral() {
        assert_eq!(UnderlyingType::from_type_name("string"), None);
        assert_eq!(UnderlyingType::from_type_name("System.Char"), None);
        assert_eq!(UnderlyingType::from_type_name(""), None);
    }

    #[test]
    fn default_is_int() {
        assert_eq!(UnderlyingType::default(), UnderlyingType::Int);
    }

    #[test]
    fn ranges() {
        assert!(UnderlyingType::Byte.contains(255));
        assert!(!UnderlyingType::Byte.contains(-1));
        assert!(UnderlyingType::SByte.contains(-128));
        assert!(UnderlyingType::ULong.contains(i128::from(u64::MAX)));
        assert!(!UnderlyingType::Long.contains(i128::from(u64::MAX)));
    }

    #[test]
    fn signedness() {
        assert!(UnderlyingType::Short.is_signed());
        assert!(!UnderlyingType::UShort.is_signed());
    }
}
