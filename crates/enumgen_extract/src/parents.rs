use enumgen_host::{ContainingType, TypeKind};
use enumgen_model::ParentScope;

/// Builds the parent chain, outermost first.
///
/// Enclosing types are visited innermost to outermost and the walk stops at
/// the first kind that cannot host a partial nested class, so everything
/// returned is a contiguous run directly around the enum.
pub(crate) fn parent_chain(containing: &[ContainingType]) -> Vec<ParentScope> {
    let mut chain: Vec<ParentScope> = containing
        .iter()
        .rev()
        .take_while(|ty| can_nest(ty.kind))
        .map(to_scope)
        .collect();
    chain.reverse();
    chain
}

fn can_nest(kind: TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Class | TypeKind::Struct | TypeKind::Record | TypeKind::RecordStruct
    )
}

fn to_scope(ty: &ContainingType) -> ParentScope {
    let name = if ty.type_parameters.is_empty() {
        ty.name.clone()
    } else {
        format!("{}<{}>", ty.name, ty.type_parameters.join(", "))
    };
    ParentScope::new(ty.kind.keyword(), name, ty.constraints.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ty(kind: TypeKind, name: &str, params: &[&str], constraints: &str) -> ContainingType {
        ContainingType {
            kind,
            name: name.to_string(),
            type_parameters: params.iter().map(|p| p.to_string()).collect(),
            constraints: constraints.to_string(),
        }
    }

    #[test]
    fn outermost_first() {
        let chain = parent_chain(&[
            ty(TypeKind::Class, "Outer", &[], ""),
            ty(TypeKind::Struct, "Inner", &["T", "U"], "where T : new()"),
        ]);
        assert_eq!(
            chain,
            vec![
                ParentScope::new("class", "Outer", ""),
                ParentScope::new("struct", "Inner<T, U>", "where T : new()"),
            ]
        );
    }

    #[test]
    fn stops_at_interface() {
        let chain = parent_chain(&[
            ty(TypeKind::Class, "Top", &[], ""),
            ty(TypeKind::Interface, "IHost", &[], ""),
            ty(TypeKind::Record, "Leaf", &[], ""),
        ]);
        assert_eq!(chain, vec![ParentScope::new("record", "Leaf", "")]);
    }

    #[test]
    fn top_level_enum_has_no_parents() {
        assert!(parent_chain(&[]).is_empty());
    }
}
