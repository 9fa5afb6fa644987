//! Immutable access policy: role hierarchy resolver and feature gate.
//!
//! The policy is built once from an [`AccessPolicyDefinition`] and never
//! mutated afterwards. Construction validates the hierarchy and precomputes
//! every role's closure so lookups never recurse.

use std::collections::{BTreeMap, BTreeSet};

use dancerealmx_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{
    AccessDecision, AccessRequirement, AccessSubject, FeatureKey, Permission, PlanId, Role,
    SubscriptionPlan, WILDCARD_PERMISSION,
};

mod features;
mod hierarchy;
mod requirements;

/// Raw configuration tables the policy is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicyDefinition {
    /// Subsumption edges: role -> roles it inherits from.
    #[serde(default)]
    pub hierarchy: BTreeMap<Role, Vec<Role>>,
    /// Permissions declared directly on each role.
    #[serde(default)]
    pub role_permissions: BTreeMap<Role, Vec<Permission>>,
    /// Features granted by holding each role.
    #[serde(default)]
    pub role_features: BTreeMap<Role, Vec<FeatureKey>>,
    /// Subscription plan catalog.
    #[serde(default)]
    pub plans: Vec<SubscriptionPlan>,
}

/// Validated, read-only access policy.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    direct_inheritance: BTreeMap<Role, BTreeSet<Role>>,
    inherited_roles: BTreeMap<Role, BTreeSet<Role>>,
    declared_permissions: BTreeMap<Role, BTreeSet<Permission>>,
    resolved_permissions: BTreeMap<Role, BTreeSet<Permission>>,
    role_features: BTreeMap<Role, Vec<FeatureKey>>,
    plans: BTreeMap<PlanId, SubscriptionPlan>,
    known_features: BTreeSet<FeatureKey>,
}

impl AccessPolicy {
    /// Validates a definition and builds the policy.
    ///
    /// A cyclic hierarchy or a duplicated plan id is a configuration error.
    pub fn new(definition: AccessPolicyDefinition) -> AppResult<Self> {
        let direct_inheritance: BTreeMap<Role, BTreeSet<Role>> = definition
            .hierarchy
            .into_iter()
            .map(|(role, inherited)| (role, inherited.into_iter().collect()))
            .collect();

        if let Some(cycle) = hierarchy::find_cycle(&direct_inheritance) {
            let path = cycle
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(AppError::Configuration(format!(
                "role hierarchy contains a cycle: {path}"
            )));
        }

        let declared_permissions: BTreeMap<Role, BTreeSet<Permission>> = definition
            .role_permissions
            .into_iter()
            .map(|(role, permissions)| (role, permissions.into_iter().collect()))
            .collect();

        let mut inherited_roles = BTreeMap::new();
        let mut resolved_permissions = BTreeMap::new();
        for role in Role::all() {
            let closure = hierarchy::transitive_closure(*role, &direct_inheritance);

            let mut permissions = declared_permissions
                .get(role)
                .cloned()
                .unwrap_or_default();
            for inherited in &closure {
                if let Some(inherited_permissions) = declared_permissions.get(inherited) {
                    permissions.extend(inherited_permissions.iter().cloned());
                }
            }

            inherited_roles.insert(*role, closure);
            resolved_permissions.insert(*role, permissions);
        }

        let mut plans = BTreeMap::new();
        for plan in definition.plans {
            let plan_id = plan.id.clone();
            if plans.insert(plan_id.clone(), plan).is_some() {
                return Err(AppError::Configuration(format!(
                    "subscription plan '{plan_id}' is defined more than once"
                )));
            }
        }

        let mut known_features: BTreeSet<FeatureKey> = definition
            .role_features
            .values()
            .flatten()
            .cloned()
            .collect();
        known_features.extend(plans.values().flat_map(|plan| plan.features.iter().cloned()));

        Ok(Self {
            direct_inheritance,
            inherited_roles,
            declared_permissions,
            resolved_permissions,
            role_features: definition.role_features,
            plans,
            known_features,
        })
    }

    /// Builds the policy from the built-in DanceRealmX catalog.
    pub fn builtin() -> AppResult<Self> {
        Self::new(crate::catalog::builtin_policy_definition()?)
    }

    /// Returns a seeded plan by identifier.
    #[must_use]
    pub fn plan(&self, plan_id: &PlanId) -> Option<&SubscriptionPlan> {
        self.plans.get(plan_id)
    }

    /// Returns all seeded plans ordered by identifier.
    pub fn plans(&self) -> impl Iterator<Item = &SubscriptionPlan> {
        self.plans.values()
    }

    /// Returns roles unlocked while the plan is active. Unknown plans unlock nothing.
    #[must_use]
    pub fn roles_unlocked_by(&self, plan_id: &PlanId) -> BTreeSet<Role> {
        self.plans
            .get(plan_id)
            .map(|plan| plan.unlocked_roles.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns every feature key mentioned by the role tables or the plan catalog.
    #[must_use]
    pub fn known_features(&self) -> &BTreeSet<FeatureKey> {
        &self.known_features
    }
}
