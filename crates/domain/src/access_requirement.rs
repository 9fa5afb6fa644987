use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{FeatureKey, Permission, PlanTier, Role};

/// Precondition a request handler declares before running privileged logic.
///
/// Capability checks and role checks are evaluated differently:
/// [`AccessRequirement::AllPermissions`] requires every listed permission,
/// while [`AccessRequirement::AnyRole`] is satisfied by holding any one of
/// the listed roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AccessRequirement {
    /// Every permission must resolve for the user.
    AllPermissions(Vec<Permission>),
    /// At least one permission must resolve for the user.
    AnyPermission(Vec<Permission>),
    /// The user must directly hold at least one of the roles.
    AnyRole(Vec<Role>),
    /// The feature gate must grant the feature.
    Feature(FeatureKey),
    /// The user must have an active subscription of any plan.
    ActiveSubscription,
    /// The user must have an active subscription of at least this tier.
    MinimumPlan(PlanTier),
}

impl Display for AccessRequirement {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllPermissions(permissions) => {
                write!(formatter, "all of permissions [{}]", join(permissions))
            }
            Self::AnyPermission(permissions) => {
                write!(formatter, "any of permissions [{}]", join(permissions))
            }
            Self::AnyRole(roles) => write!(formatter, "any of roles [{}]", join(roles)),
            Self::Feature(feature) => write!(formatter, "feature '{feature}'"),
            Self::ActiveSubscription => formatter.write_str("an active subscription"),
            Self::MinimumPlan(tier) => {
                write!(formatter, "an active plan of tier '{}' or higher", tier.as_str())
            }
        }
    }
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of evaluating an [`AccessRequirement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The requirement is satisfied.
    Allowed,
    /// The requirement is not satisfied.
    Denied {
        /// Human-readable reason suitable for logs and 403 payloads.
        reason: String,
    },
}

impl AccessDecision {
    /// Builds a denial with a reason.
    #[must_use]
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }

    /// Returns whether access was granted.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}
