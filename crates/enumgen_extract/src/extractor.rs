//! Candidate to descriptor conversion.

use enumgen_common::{CancellationToken, SourceLocation};
use enumgen_config::AttributeConfig;
use enumgen_diagnostics::{Diagnostic, DiagnosticCode};
use enumgen_host::{Accessibility, AttributeData, EnumCandidate, EnumSymbolData};
use enumgen_model::descriptor::default_extension_name;
use enumgen_model::{EnumDescriptor, UnderlyingType};

use crate::extraction::Extraction;
use crate::members::{extract_members, MemberAbort};
use crate::parents::parent_chain;

/// Marker property overriding the generated class name.
pub const EXTENSION_CLASS_NAME: &str = "ExtensionClassName";

/// Marker property overriding the generated class namespace.
pub const EXTENSION_CLASS_NAMESPACE: &str = "ExtensionClassNamespace";

/// Extracts a descriptor from one host candidate.
///
/// Never fails: unresolved, unmarked and cancelled candidates are skipped
/// silently, and malformed metadata is skipped with a warning.
pub fn extract(
    candidate: &EnumCandidate,
    attributes: &AttributeConfig,
    cancel: &CancellationToken,
) -> Extraction {
    if cancel.is_cancelled() {
        return Extraction::skipped();
    }
    let Some(symbol) = candidate.symbol.as_ref() else {
        tracing::trace!(location = %candidate.syntax.location(), "unresolved enum symbol");
        return Extraction::skipped();
    };
    let Some(marker) = symbol.attributes.iter().find(|a| a.is(&attributes.marker)) else {
        return Extraction::skipped();
    };

    let location = candidate.syntax.location();
    match build(symbol, marker, attributes, cancel, &location) {
        Ok(descriptor) => Extraction::Descriptor(descriptor),
        Err(Some(diag)) => {
            tracing::trace!(
                enum_name = %symbol.fully_qualified_name,
                code = %diag.code,
                "skipping enum"
            );
            Extraction::Skipped(Some(diag))
        }
        Err(None) => Extraction::skipped(),
    }
}

fn build(
    symbol: &EnumSymbolData,
    marker: &AttributeData,
    attributes: &AttributeConfig,
    cancel: &CancellationToken,
    location: &SourceLocation,
) -> Result<EnumDescriptor, Option<Diagnostic>> {
    if marker.has_error_argument() {
        return Err(Some(malformed(&symbol.fully_qualified_name, &attributes.marker, location)));
    }

    let underlying_type = match symbol.underlying_type.as_deref() {
        None => UnderlyingType::default(),
        Some(name) => UnderlyingType::from_type_name(name).ok_or_else(|| {
            Some(Diagnostic::warning(
                DiagnosticCode::UNSUPPORTED_UNDERLYING_TYPE,
                format!(
                    "enum '{}' has unsupported underlying type '{name}'",
                    symbol.fully_qualified_name
                ),
                location.clone(),
            ))
        })?,
    };

    let extension_name = marker
        .named(EXTENSION_CLASS_NAME)
        .and_then(|value| value.value_text())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| default_extension_name(&symbol.name));

    let namespace = match marker.named(EXTENSION_CLASS_NAMESPACE).and_then(|v| v.value_text()) {
        Some(ns) => Some(ns),
        None => symbol.namespace.clone(),
    }
    .filter(|ns| !ns.is_empty());

    let members = extract_members(&symbol.members, underlying_type, attributes, cancel)
        .map_err(|abort| match abort {
            MemberAbort::Cancelled => None,
            MemberAbort::Malformed { member, attribute } => Some(malformed(
                &format!("{}.{member}", symbol.fully_qualified_name),
                &attribute,
                location,
            )),
        })?;

    Ok(EnumDescriptor {
        name: symbol.fully_qualified_name.clone(),
        extension_name,
        namespace,
        underlying_type,
        is_public: symbol.accessibility == Accessibility::Public,
        has_flags: symbol.attributes.iter().any(|a| a.is(&attributes.flags)),
        members: members.into(),
        parents: parent_chain(&symbol.containing_types).into(),
    })
}

fn malformed(target: &str, attribute: &str, location: &SourceLocation) -> Diagnostic {
    Diagnostic::warning(
        DiagnosticCode::MALFORMED_ATTRIBUTE_ARGUMENT,
        format!("attribute '{attribute}' on '{target}' has an argument that is not a valid constant"),
        location.clone(),
    )
}
