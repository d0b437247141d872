//! Lookup tables behind the generated helpers, with a reference evaluator.
//!
//! Values are handled as the 64-bit pattern the generated code sees after
//! an unchecked conversion to `ulong`, and converted back through the
//! enum's storage type, so the evaluator agrees with the emitted C# for
//! negative and unsigned values alike.

use std::collections::HashSet;

use enumgen_model::{unescape_literal, EnumDescriptor, EnumMember, UnderlyingType};

/// Separator between names in a flags combination.
pub const FLAGS_SEPARATOR: &str = ", ";

/// The tables the emitter renders for one descriptor.
#[derive(Debug)]
pub struct ExtensionPlan<'a> {
    descriptor: &'a EnumDescriptor,
    distinct: Vec<&'a EnumMember>,
    display_lookup: Vec<(&'a str, &'a EnumMember)>,
}

impl<'a> ExtensionPlan<'a> {
    /// Builds the plan for a descriptor.
    pub fn new(descriptor: &'a EnumDescriptor) -> Self {
        let mut seen_values = HashSet::new();
        let distinct = descriptor
            .members
            .iter()
            .filter(|m| seen_values.insert(m.value))
            .collect();

        let display_lookup = descriptor
            .members
            .iter()
            .filter(|m| m.option.is_first_presence)
            .filter_map(|m| m.option.display_name.as_deref().map(|name| (name, m)))
            .collect();

        Self {
            descriptor,
            distinct,
            display_lookup,
        }
    }

    /// The descriptor this plan was built from.
    pub fn descriptor(&self) -> &'a EnumDescriptor {
        self.descriptor
    }

    /// Members with a value no earlier member has, in declaration order.
    pub fn distinct_members(&self) -> &[&'a EnumMember] {
        &self.distinct
    }

    /// First-presence display names (escaped) and their members.
    pub fn display_lookup(&self) -> &[(&'a str, &'a EnumMember)] {
        &self.display_lookup
    }

    /// Every declared member, in declaration order.
    pub fn members(&self) -> &'a [EnumMember] {
        self.descriptor.members.as_slice()
    }

    fn lookup(&self, value: i128) -> Option<&'a EnumMember> {
        self.distinct.iter().copied().find(|m| m.value == value)
    }

    fn underlying(&self) -> UnderlyingType {
        self.descriptor.underlying_type
    }

    /// The result of the generated `ToStringFast`.
    pub fn to_string_fast(&self, value: i128) -> String {
        match self.lookup(value) {
            Some(member) => member.name.clone(),
            None if self.descriptor.has_flags => self.format_flags(value),
            None => value.to_string(),
        }
    }

    /// The result of the generated `FormatFlags`, including the exact-match
    /// step `ToStringFast` performs before calling it.
    pub fn format_flags(&self, value: i128) -> String {
        if let Some(member) = self.lookup(value) {
            return member.name.clone();
        }
        let mut remaining = to_bits(value);
        if remaining == 0 {
            return "0".to_string();
        }

        let mut parts: Vec<String> = Vec::new();
        for member in &self.distinct {
            let bits = to_bits(member.value);
            if bits != 0 && remaining & bits == bits {
                parts.push(member.name.clone());
                remaining &= !bits;
            }
        }
        if remaining != 0 {
            parts.push(from_bits(self.underlying(), remaining).to_string());
        }
        parts.join(FLAGS_SEPARATOR)
    }

    /// The result of the generated `IsDefined(E)`.
    pub fn is_defined(&self, value: i128) -> bool {
        self.lookup(value).is_some()
    }

    /// The result of the generated `IsDefined(string?)`.
    pub fn is_defined_name(&self, name: &str) -> bool {
        self.members().iter().any(|m| m.name == name)
    }

    /// The result of the generated `TryParse`.
    ///
    /// Flags enums accept a comma-separated list of member names; each part
    /// is trimmed and the values are combined.
    pub fn try_parse(&self, text: &str) -> Option<i128> {
        if !self.descriptor.has_flags {
            return self.value_of(text);
        }
        let mut bits = 0u64;
        for part in text.split(',') {
            bits |= to_bits(self.value_of(part.trim())?);
        }
        Some(from_bits(self.underlying(), bits))
    }

    fn value_of(&self, name: &str) -> Option<i128> {
        self.members()
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.value)
    }

    /// The result of the generated `ToDisplayString`, as runtime text.
    pub fn to_display_string(&self, value: i128) -> String {
        match self.lookup(value) {
            Some(member) => match &member.option.display_name {
                Some(name) => unescape_literal(name),
                None => member.name.clone(),
            },
            None => self.to_string_fast(value),
        }
    }

    /// The result of the generated `TryParseDisplayName`, matching runtime
    /// text against first-presence display names only.
    pub fn try_parse_display(&self, text: &str) -> Option<i128> {
        self.display_lookup
            .iter()
            .find(|(name, _)| unescape_literal(name) == text)
            .map(|(_, member)| member.value)
    }
}

/// The 64-bit pattern of `value` after `unchecked((ulong)value)`.
pub fn to_bits(value: i128) -> u64 {
    value as u64
}

/// Converts a 64-bit pattern back through the storage type, truncating and
/// sign-extending as an unchecked cast would.
pub fn from_bits(underlying: UnderlyingType, bits: u64) -> i128 {
    match underlying {
        UnderlyingType::SByte => i128::from(bits as u8 as i8),
        UnderlyingType::Byte => i128::from(bits as u8),
        UnderlyingType::Short => i128::from(bits as u16 as i16),
        UnderlyingType::UShort => i128::from(bits as u16),
        UnderlyingType::Int => i128::from(bits as u32 as i32),
        UnderlyingType::UInt => i128::from(bits as u32),
        UnderlyingType::Long => i128::from(bits as i64),
        UnderlyingType::ULong => i128::from(bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enumgen_model::ValueOption;

    fn descriptor(has_flags: bool, members: Vec<EnumMember>) -> EnumDescriptor {
        let mut d = EnumDescriptor::new("MyEnums.Colour", Some("MyEnums".to_string()));
        d.has_flags = has_flags;
        d.members = members.into();
        d
    }

    fn colours() -> EnumDescriptor {
        descriptor(
            false,
            vec![EnumMember::new("Red", 0), EnumMember::new("Blue", 1)],
        )
    }

    fn flags() -> EnumDescriptor {
        descriptor(
            true,
            vec![
                EnumMember::new("Red", 1),
                EnumMember::new("Blue", 2),
                EnumMember::new("Green", 4),
            ],
        )
    }

    #[test]
    fn undefined_value_falls_back_to_number() {
        let d = colours();
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(1), "Blue");
        assert_eq!(plan.to_string_fast(2), "2");
        assert_eq!(plan.to_string_fast(-5), "-5");
    }

    #[test]
    fn duplicate_values_first_declared_wins() {
        let d = descriptor(
            false,
            vec![
                EnumMember::new("First", 1),
                EnumMember::new("Alias", 1),
                EnumMember::new("Other", 2),
            ],
        );
        let plan = ExtensionPlan::new(&d);
        let names: Vec<&str> = plan.distinct_members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Other"]);
        assert_eq!(plan.to_string_fast(1), "First");
        assert_eq!(plan.try_parse("Alias"), Some(1));
        assert!(plan.is_defined_name("Alias"));
    }

    #[test]
    fn flags_combination() {
        let d = flags();
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(3), "Red, Blue");
        assert_eq!(plan.to_string_fast(7), "Red, Blue, Green");
        assert_eq!(plan.try_parse("Red, Blue"), Some(3));
        assert_eq!(plan.try_parse(" Green ,Red"), Some(5));
    }

    #[test]
    fn flags_remainder_and_zero() {
        let d = flags();
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(9), "Red, 8");
        assert_eq!(plan.to_string_fast(8), "8");
        assert_eq!(plan.to_string_fast(0), "0");
    }

    #[test]
    fn flags_zero_member_matches_exactly() {
        let d = descriptor(
            true,
            vec![EnumMember::new("None", 0), EnumMember::new("Read", 1)],
        );
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(0), "None");
        assert_eq!(plan.to_string_fast(1), "Read");
    }

    #[test]
    fn flags_composite_member_exact_match() {
        let d = descriptor(
            true,
            vec![
                EnumMember::new("A", 1),
                EnumMember::new("B", 2),
                EnumMember::new("Both", 3),
                EnumMember::new("C", 4),
            ],
        );
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(3), "Both");
        assert_eq!(plan.to_string_fast(7), "A, B, C");
    }

    #[test]
    fn parse_rejects_unknown_and_empty_parts() {
        let d = flags();
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.try_parse("Red, Purple"), None);
        assert_eq!(plan.try_parse("Red,,Blue"), None);
        assert_eq!(plan.try_parse(""), None);

        let d = colours();
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.try_parse("Red, Blue"), None);
        assert_eq!(plan.try_parse("Blue"), Some(1));
    }

    #[test]
    fn first_presence_display_lookup() {
        let d = descriptor(
            false,
            vec![
                EnumMember::new("A", 0).with_option(ValueOption::display("X", true)),
                EnumMember::new("B", 1).with_option(ValueOption::display("X", false)),
                EnumMember::new("C", 2).with_option(ValueOption::display("Y", true)),
            ],
        );
        let plan = ExtensionPlan::new(&d);
        let lookup: Vec<(&str, &str)> = plan
            .display_lookup()
            .iter()
            .map(|(name, m)| (*name, m.name.as_str()))
            .collect();
        assert_eq!(lookup, vec![("X", "A"), ("Y", "C")]);
        assert_eq!(plan.try_parse_display("X"), Some(0));
        assert_eq!(plan.try_parse_display("Y"), Some(2));
        assert_eq!(plan.try_parse_display("B"), None);
        assert_eq!(plan.to_display_string(1), "X");
    }

    #[test]
    fn display_strings_are_runtime_text() {
        let d = descriptor(
            false,
            vec![
                EnumMember::new("Quote", 0)
                    .with_option(ValueOption::display(r#"say \"hi\""#, true)),
                EnumMember::new("Plain", 1),
            ],
        );
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_display_string(0), r#"say "hi""#);
        assert_eq!(plan.to_display_string(1), "Plain");
        assert_eq!(plan.to_display_string(9), "9");
        assert_eq!(plan.try_parse_display(r#"say "hi""#), Some(0));
    }

    #[test]
    fn bits_follow_storage_type() {
        assert_eq!(to_bits(-1), u64::MAX);
        assert_eq!(from_bits(UnderlyingType::SByte, 0xFF), -1);
        assert_eq!(from_bits(UnderlyingType::Byte, 0x1FF), 255);
        assert_eq!(from_bits(UnderlyingType::ULong, u64::MAX), i128::from(u64::MAX));
    }

    #[test]
    fn signed_flags_roundtrip() {
        let mut d = descriptor(
            true,
            vec![EnumMember::new("Low", 1), EnumMember::new("High", -128)],
        );
        d.underlying_type = UnderlyingType::SByte;
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.try_parse("Low, High"), Some(-127));
        assert_eq!(plan.to_string_fast(-127), "Low, High");
    }

    #[test]
    fn signed_flags_remainder_uses_storage_type() {
        let d = descriptor(
            true,
            vec![EnumMember::new("Red", 1), EnumMember::new("Blue", 2)],
        );
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(-8), "-8");
        assert_eq!(plan.to_string_fast(-7), "Red, -8");

        let mut d = descriptor(true, vec![EnumMember::new("Low", 1)]);
        d.underlying_type = UnderlyingType::SByte;
        let plan = ExtensionPlan::new(&d);
        assert_eq!(plan.to_string_fast(-128), "-128");
        assert_eq!(plan.to_string_fast(-127), "Low, -128");
    }

    #[test]
    fn unsigned_flags_remainder_stays_unsigned() {
        let mut d = descriptor(true, vec![EnumMember::new("Low", 1)]);
        d.underlying_type = UnderlyingType::ULong;
        let plan = ExtensionPlan::new(&d);
        let top = i128::from(u64::MAX);
        assert_eq!(plan.to_string_fast(top), "Low, 18446744073709551614");
    }
}
