use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use dancerealmx_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Token granting every permission.
pub const WILDCARD_PERMISSION: &str = "*";

/// Opaque permission token such as `manage:bookings` or `view:own:progress`.
///
/// Tokens are compared for exact equality only. The `verb:resource` and
/// `verb:own:resource` shapes are a naming convention that
/// [`Permission::parts`] can decode, but matching never relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission(String);

impl Permission {
    /// Creates a validated permission token.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Validation(
                "permission must not be empty".to_owned(),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(AppError::Validation(format!(
                "permission '{value}' must not contain whitespace"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the wildcard permission.
    #[must_use]
    pub fn wildcard() -> Self {
        Self(WILDCARD_PERMISSION.to_owned())
    }

    /// Builds the `{action}:{resource_type}` token for a resource action.
    pub fn for_action(action: &str, resource_type: &str) -> AppResult<Self> {
        Self::new(format!("{action}:{resource_type}"))
    }

    /// Returns whether this is the wildcard token.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.0 == WILDCARD_PERMISSION
    }

    /// Returns the token string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Decodes the `verb[:own]:resource` convention, if the token follows it.
    #[must_use]
    pub fn parts(&self) -> Option<PermissionParts<'_>> {
        let mut segments = self.0.split(':');
        let verb = segments.next().filter(|value| !value.is_empty())?;
        let second = segments.next().filter(|value| !value.is_empty())?;

        match segments.next() {
            None => Some(PermissionParts {
                verb,
                ownership: Ownership::Any,
                resource: second,
            }),
            Some(resource) if second == "own" && !resource.is_empty() => {
                segments.next().is_none().then_some(PermissionParts {
                    verb,
                    ownership: Ownership::Own,
                    resource,
                })
            }
            Some(_) => None,
        }
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for Permission {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.0
    }
}

/// Whether a permission applies to any instance or only actor-owned ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Applies to every instance of the resource.
    Any,
    /// Applies only to instances owned by the actor.
    Own,
}

/// Decoded view of a conventional permission token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionParts<'a> {
    /// Action verb, e.g. `manage`.
    pub verb: &'a str,
    /// Ownership qualifier.
    pub ownership: Ownership,
    /// Resource segment, e.g. `bookings`.
    pub resource: &'a str,
}
