use std::collections::BTreeSet;

use dancerealmx_domain::{FeatureKey, Permission, PlanTier, Role};

use super::*;

/// Snapshot of everything a user may do, for client-side gating.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveAccess {
    /// Roles held directly.
    pub roles: BTreeSet<Role>,
    /// Roles received through the hierarchy, excluding held ones.
    pub inherited_roles: BTreeSet<Role>,
    /// Resolved permissions across all held roles.
    pub permissions: BTreeSet<Permission>,
    /// Features granted by roles and active subscriptions.
    pub features: BTreeSet<FeatureKey>,
    /// Richest active plan tier.
    pub active_plan_tier: Option<PlanTier>,
    /// Stored role tags that did not match a known role.
    pub ignored_role_tags: Vec<String>,
}

impl AccessService {
    /// Resolves roles, permissions and features for a user.
    ///
    /// Unknown users resolve to an empty snapshot.
    pub async fn effective_access(&self, user: &UserIdentity) -> AppResult<EffectiveAccess> {
        let Some((subject, ignored_role_tags)) =
            self.load_subject_with_ignored_tags(user).await?
        else {
            return Ok(EffectiveAccess::default());
        };

        let inherited_roles = subject
            .roles()
            .iter()
            .flat_map(|role| self.policy.inherited_roles(*role))
            .filter(|role| !subject.holds(*role))
            .collect();

        Ok(EffectiveAccess {
            roles: subject.roles().clone(),
            inherited_roles,
            permissions: self.policy.subject_permissions(&subject),
            features: self.policy.user_features(Some(&subject)),
            active_plan_tier: self.policy.highest_active_tier(&subject),
            ignored_role_tags,
        })
    }
}
