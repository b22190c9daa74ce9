//! Security policy applied to model-authored queries.

use apollo_compiler::executable::{Selection, SelectionSet};

/// Maximum nesting of field selections in one operation.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Types whose data is secret material and must never be selected.
pub const FORBIDDEN_TYPES: &[&str] = &[
    "Secret",
    "SecretValue",
    "SecretConnection",
    "SecretEdge",
    "DeploymentKey",
    "CreateServiceAccountTokenPayload",
    "ServiceAccountToken",
    "ServiceAccountTokenConnection",
    "ServiceAccountTokenEdge",
];

pub fn is_forbidden_type(type_name: &str) -> bool {
    FORBIDDEN_TYPES.contains(&type_name)
}

/// Depth of a selection set.
///
/// Fields add one level, inline fragments add none. Fragment spreads are not
/// resolved and count as one level.
pub fn selection_depth(selection_set: &SelectionSet) -> usize {
    depth_from(&selection_set.selections, 0)
}

fn depth_from(selections: &[Selection], current: usize) -> usize {
    selections
        .iter()
        .map(|selection| match selection {
            Selection::Field(field) => depth_from(&field.selection_set.selections, current + 1),
            Selection::InlineFragment(inline) => {
                depth_from(&inline.selection_set.selections, current)
            }
            Selection::FragmentSpread(_) => current + 1,
        })
        .fold(current, usize::max)
}

/// First selection reaching a forbidden type, as a policy message.
///
/// Fields are checked by their return type with list and non-null wrappers
/// removed, inline fragments by their type condition. Fragment spreads are
/// only checked by name: a spread whose name contains "secret" is rejected,
/// the fragment body is not inspected.
pub fn find_forbidden_access(selection_set: &SelectionSet) -> Option<String> {
    selection_set.selections.iter().find_map(|selection| match selection {
        Selection::Field(field) => {
            let type_name = field.definition.ty.inner_named_type();
            if is_forbidden_type(type_name.as_str()) {
                return Some(format!(
                    "security policy: field '{}' returns type '{}' which contains sensitive data that cannot be accessed via this interface. Use the Nais Console or CLI to manage secrets directly.",
                    field.name, type_name
                ));
            }
            find_forbidden_access(&field.selection_set)
        }
        Selection::InlineFragment(inline) => {
            if let Some(condition) = &inline.type_condition {
                if is_forbidden_type(condition.as_str()) {
                    return Some(format!(
                        "security policy: inline fragment on type '{condition}' which contains sensitive data that cannot be accessed via this interface"
                    ));
                }
            }
            find_forbidden_access(&inline.selection_set)
        }
        Selection::FragmentSpread(spread) => {
            let name = spread.fragment_name.as_str();
            name.to_lowercase().contains("secret").then(|| {
                format!(
                    "security policy: fragment '{name}' may access sensitive data that cannot be accessed via this interface"
                )
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denylist_covers_connection_and_edge_wrappers() {
        for name in ["Secret", "SecretValue", "SecretConnection", "SecretEdge", "ServiceAccountTokenEdge"] {
            assert!(is_forbidden_type(name), "{name}");
        }
        assert!(!is_forbidden_type("Team"));
        assert!(!is_forbidden_type("secret"));
    }
}
