//! Loads the access policy from the built-in catalog or a JSON document.

use std::path::Path;

use dancerealmx_core::{AppError, AppResult};
use dancerealmx_domain::{AccessPolicy, AccessPolicyDefinition};
use tracing::info;

/// Builds the process-wide access policy.
///
/// Without a path the built-in catalog is used. With a path the document
/// replaces the built-in tables entirely. Any failure, including a cycle in
/// the role hierarchy, is a configuration error.
pub fn load_access_policy(path: Option<&Path>) -> AppResult<AccessPolicy> {
    let Some(path) = path else {
        let policy = AccessPolicy::builtin()?;
        info!(
            plans = policy.plans().count(),
            features = policy.known_features().len(),
            "loaded built-in access policy"
        );
        return Ok(policy);
    };

    let contents = std::fs::read_to_string(path).map_err(|error| {
        AppError::Configuration(format!(
            "failed to read access policy '{}': {error}",
            path.display()
        ))
    })?;
    let policy = parse_access_policy(contents.as_str())?;
    info!(
        path = %path.display(),
        plans = policy.plans().count(),
        features = policy.known_features().len(),
        "loaded access policy document"
    );

    Ok(policy)
}

/// Parses and validates a JSON policy document.
pub fn parse_access_policy(document: &str) -> AppResult<AccessPolicy> {
    let definition: AccessPolicyDefinition = serde_json::from_str(document).map_err(|error| {
        AppError::Configuration(format!("invalid access policy document: {error}"))
    })?;

    AccessPolicy::new(definition)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use dancerealmx_core::AppError;
    use dancerealmx_domain::Role;

    use super::{load_access_policy, parse_access_policy};

    #[test]
    fn missing_path_uses_builtin_catalog() {
        let Ok(policy) = load_access_policy(None) else {
            panic!("built-in policy must load");
        };
        assert!(policy.has_permission(Role::InstructorAdmin, "book:sessions"));
    }

    #[test]
    fn document_replaces_builtin_tables() {
        let document = r#"{
            "hierarchy": { "STUDENT": ["GUEST_USER"] },
            "role_permissions": {
                "STUDENT": ["enroll:courses"],
                "GUEST_USER": ["view:public:courses"]
            },
            "role_features": { "STUDENT": ["enroll_courses"] }
        }"#;

        let Ok(policy) = parse_access_policy(document) else {
            panic!("document should parse");
        };
        assert!(policy.has_permission(Role::Student, "view:public:courses"));
        assert!(!policy.has_permission(Role::InstructorAdmin, "book:sessions"));
        assert_eq!(policy.plans().count(), 0);
    }

    #[test]
    fn cyclic_document_is_a_configuration_error() {
        let document = r#"{
            "hierarchy": {
                "STUDENT": ["BOOKING_USER"],
                "BOOKING_USER": ["STUDENT"]
            }
        }"#;

        let result = parse_access_policy(document);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn malformed_document_is_a_configuration_error() {
        let result = parse_access_policy(r#"{ "hierarchy": { "NOT_A_ROLE": [] } }"#);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn unreadable_path_is_a_configuration_error() {
        let result = load_access_policy(Some(Path::new("/nonexistent/dancerealmx-policy.json")));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
