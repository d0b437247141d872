use std::collections::HashSet;

use enumgen_common::CancellationToken;
use enumgen_config::AttributeConfig;
use enumgen_host::{AttributeData, MemberSymbol, TypedConstant};
use enumgen_model::{escape_literal, EnumMember, UnderlyingType, ValueOption};

/// Named argument of the display attribute carrying the display name.
const DISPLAY_NAME: &str = "Name";

/// Why member extraction stopped early.
#[derive(Debug, PartialEq)]
pub(crate) enum MemberAbort {
    Cancelled,
    /// An attribute on the named member could not be evaluated.
    Malformed { member: String, attribute: String },
}

/// Copies constant members in declaration order, resolving display names
/// and first presence.
pub(crate) fn extract_members(
    members: &[MemberSymbol],
    underlying: UnderlyingType,
    attributes: &AttributeConfig,
    cancel: &CancellationToken,
) -> Result<Vec<EnumMember>, MemberAbort> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(members.len());

    for member in members {
        if cancel.is_cancelled() {
            return Err(MemberAbort::Cancelled);
        }
        let Some(constant) = member.constant else {
            continue;
        };
        let value = constant.as_i128();
        if !underlying.contains(value) {
            tracing::trace!(member = %member.name, %value, "constant outside storage range");
            continue;
        }

        let option = match display_name(member, attributes)? {
            Some(name) => {
                let first = seen.insert(name.clone());
                ValueOption::display(name, first)
            }
            None => ValueOption::none(),
        };
        out.push(EnumMember::new(member.name.clone(), value).with_option(option));
    }
    Ok(out)
}

/// Resolves a member's escaped display name. The display attribute's `Name`
/// wins over a single-argument description.
fn display_name(
    member: &MemberSymbol,
    attributes: &AttributeConfig,
) -> Result<Option<String>, MemberAbort> {
    let display = find(member, &attributes.display)?;
    if let Some(name) = display
        .and_then(|attr| attr.named(DISPLAY_NAME))
        .and_then(TypedConstant::value_text)
    {
        return Ok(Some(escape_literal(&name)));
    }

    let description = find(member, &attributes.description)?;
    let text = description
        .filter(|attr| attr.constructor_arguments.len() == 1)
        .and_then(|attr| attr.constructor_arguments[0].value_text());
    Ok(text.map(|t| escape_literal(&t)))
}

fn find<'a>(
    member: &'a MemberSymbol,
    class_name: &str,
) -> Result<Option<&'a AttributeData>, MemberAbort> {
    match member.attributes.iter().find(|attr| attr.is(class_name)) {
        Some(attr) if attr.has_error_argument() => Err(MemberAbort::Malformed {
            member: member.name.clone(),
            attribute: class_name.to_string(),
        }),
        found => Ok(found),
    }
}
