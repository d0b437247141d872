//! Conformance test helpers for the enum extension generator.
//!
//! Provides builders for host enum symbols and compilations, plus shared
//! functions that run the full generator pipeline (extract → filter → emit)
//! and the cache verifier, for assertion in integration tests.

#![warn(missing_docs)]

use enumgen_common::SourceLocation;
use enumgen_config::{AttributeConfig, GeneratorConfig};
use enumgen_generator::{
    EnumGenerator, GeneratorOutput, INITIAL_EXTRACTION, REMOVING_NULLS, SOURCE_OUTPUT,
};
use enumgen_host::{
    Accessibility, AttributeData, Compilation, ContainingType, EnumCandidate, EnumSymbolData,
    MemberSymbol, TypeKind, TypedConstant,
};
use enumgen_incremental::{Pipeline, RunOptions};
use enumgen_verify::{verify, CacheViolation, VerifyReport};

/// Every stage of the generator, in pipeline order.
pub const ALL_STAGES: [&str; 3] = [INITIAL_EXTRACTION, REMOVING_NULLS, SOURCE_OUTPUT];

/// Named argument of the display attribute carrying the display text.
const DISPLAY_NAME: &str = "Name";

/// Builder for one host enum declaration using the default attribute names.
#[derive(Clone, Debug)]
pub struct EnumFixture {
    data: EnumSymbolData,
    marker: Option<AttributeData>,
    attributes: AttributeConfig,
}

impl EnumFixture {
    /// A public `int` enum marked for generation.
    ///
    /// `name` is fully qualified; everything before the last `.` becomes the
    /// namespace.
    pub fn new(name: &str) -> Self {
        let attributes = AttributeConfig::default();
        let (namespace, simple) = match name.rsplit_once('.') {
            Some((ns, simple)) => (Some(ns.to_string()), simple),
            None => (None, name),
        };
        Self {
            data: EnumSymbolData {
                name: simple.to_string(),
                fully_qualified_name: name.to_string(),
                namespace,
                containing_types: Vec::new(),
                underlying_type: None,
                accessibility: Accessibility::Public,
                members: Vec::new(),
                attributes: Vec::new(),
            },
            marker: Some(AttributeData::new(attributes.marker.clone())),
            attributes,
        }
    }

    /// Removes the generation marker.
    pub fn unmarked(mut self) -> Self {
        self.marker = None;
        self
    }

    /// Overrides the containing namespace, for nested enums whose qualified
    /// name includes their parent types.
    pub fn namespace(mut self, namespace: Option<&str>) -> Self {
        self.data.namespace = namespace.map(str::to_string);
        self
    }

    /// Adds a constant member.
    pub fn member(mut self, name: &str, value: i64) -> Self {
        self.data.members.push(MemberSymbol::new(name, value));
        self
    }

    /// Adds several constant members.
    pub fn members(self, members: &[(&str, i64)]) -> Self {
        members
            .iter()
            .fold(self, |fixture, (name, value)| fixture.member(name, *value))
    }

    /// Adds a member with a display attribute.
    pub fn display_member(mut self, name: &str, value: i64, display: &str) -> Self {
        let attribute = AttributeData::new(self.attributes.display.clone())
            .with_named(DISPLAY_NAME, TypedConstant::String(display.to_string()));
        self.data
            .members
            .push(MemberSymbol::new(name, value).with_attribute(attribute));
        self
    }

    /// Adds a member with a description attribute.
    pub fn described_member(mut self, name: &str, value: i64, description: &str) -> Self {
        let attribute = AttributeData::new(self.attributes.description.clone())
            .with_argument(TypedConstant::String(description.to_string()));
        self.data
            .members
            .push(MemberSymbol::new(name, value).with_attribute(attribute));
        self
    }

    /// Adds a prebuilt member.
    pub fn raw_member(mut self, member: MemberSymbol) -> Self {
        self.data.members.push(member);
        self
    }

    /// Applies the flags attribute.
    pub fn flags(mut self) -> Self {
        self.data
            .attributes
            .push(AttributeData::new(self.attributes.flags.clone()));
        self
    }

    /// Sets the declared underlying type name, e.g. `byte` or `System.Int64`.
    pub fn underlying(mut self, type_name: &str) -> Self {
        self.data.underlying_type = Some(type_name.to_string());
        self
    }

    /// Sets the declared accessibility.
    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.data.accessibility = accessibility;
        self
    }

    /// Adds an enclosing type. Call outermost first.
    pub fn nested_in(mut self, kind: TypeKind, name: &str, type_parameters: &[&str]) -> Self {
        self.data.containing_types.push(ContainingType {
            kind,
            name: name.to_string(),
            type_parameters: type_parameters.iter().map(|p| p.to_string()).collect(),
            constraints: String::new(),
        });
        self
    }

    /// Sets a named argument on the generation marker.
    pub fn marker_argument(mut self, name: &str, value: TypedConstant) -> Self {
        if let Some(marker) = self.marker.take() {
            self.marker = Some(marker.with_named(name, value));
        }
        self
    }

    /// Replaces the generation marker, e.g. to use a configured marker name.
    pub fn marker_attribute(mut self, marker: AttributeData) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Builds the symbol data.
    pub fn build(self) -> EnumSymbolData {
        let mut data = self.data;
        if let Some(marker) = self.marker {
            data.attributes.insert(0, marker);
        }
        data
    }
}

/// Builds a compilation holding one resolved candidate per fixture, each on
/// its own line of `Enums.cs`.
pub fn compilation(fixtures: Vec<EnumFixture>) -> Compilation {
    let candidates = fixtures
        .into_iter()
        .enumerate()
        .map(|(i, fixture)| {
            let line = u32::try_from(i + 1).unwrap_or(u32::MAX);
            EnumCandidate::new(SourceLocation::new("Enums.cs", line, 1), Some(fixture.build()))
        })
        .collect();
    Compilation::new("ConformanceTests", candidates)
}

/// Runs a fresh default generator once and returns its output.
pub fn run_generator(compilation: &Compilation) -> GeneratorOutput {
    run_generator_with_config(compilation, GeneratorConfig::default())
}

/// Runs a fresh generator with `config` once and returns its output.
pub fn run_generator_with_config(
    compilation: &Compilation,
    config: GeneratorConfig,
) -> GeneratorOutput {
    EnumGenerator::new(config)
        .run(compilation, &RunOptions::new())
        .output
}

/// Runs a fresh default generator through the cache verifier, tracking
/// every stage.
pub fn run_and_verify(compilation: &Compilation) -> Result<VerifyReport, CacheViolation> {
    verify(&mut EnumGenerator::default(), compilation, &ALL_STAGES)
}

/// Text of the artifact generated for `hint_name`, or an empty string.
pub fn artifact_text<'a>(output: &'a GeneratorOutput, hint_name: &str) -> &'a str {
    output
        .artifact(hint_name)
        .map(|a| a.text.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_splits_namespace() {
        let data = EnumFixture::new("MyTestEnums.Colour").build();
        assert_eq!(data.name, "Colour");
        assert_eq!(data.namespace.as_deref(), Some("MyTestEnums"));

        let global = EnumFixture::new("Colour").build();
        assert_eq!(global.namespace, None);
    }

    #[test]
    fn marker_comes_first() {
        let config = AttributeConfig::default();
        let data = EnumFixture::new("A.B").flags().build();
        assert!(data.attributes[0].is(&config.marker));
        assert!(data.attributes[1].is(&config.flags));
        assert!(EnumFixture::new("A.B").unmarked().build().attributes.is_empty());
    }

    #[test]
    fn compilation_keeps_fixture_order() {
        let compilation = compilation(vec![EnumFixture::new("A.X"), EnumFixture::new("A.Y")]);
        let names: Vec<_> = compilation
            .candidates()
            .iter()
            .filter_map(|c| c.symbol.as_ref().map(|s| s.name.clone()))
            .collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert_eq!(compilation.candidates()[1].syntax.location().line, 2);
    }
}
