use dancerealmx_application::EffectiveAccess;
use dancerealmx_core::UserIdentity;
use dancerealmx_domain::SubscriptionPlan;

use super::types::{EffectiveAccessResponse, SubscriptionPlanResponse};

impl From<&SubscriptionPlan> for SubscriptionPlanResponse {
    fn from(value: &SubscriptionPlan) -> Self {
        Self {
            plan_id: value.id.as_str().to_owned(),
            tier: value.tier.as_str().to_owned(),
            name: value.name.clone(),
            monthly_price_cents: value.monthly_price_cents,
            yearly_price_cents: value.yearly_price_cents,
            features: value
                .features
                .iter()
                .map(|feature| feature.as_str().to_owned())
                .collect(),
            unlocked_roles: value
                .unlocked_roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
        }
    }
}

impl EffectiveAccessResponse {
    /// Builds the response for the authenticated user.
    pub fn from_effective_access(user: &UserIdentity, access: EffectiveAccess) -> Self {
        Self {
            user_id: user.user_id().to_string(),
            display_name: user.display_name().to_owned(),
            email: user.email().map(str::to_owned),
            roles: access
                .roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            inherited_roles: access
                .inherited_roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            permissions: access
                .permissions
                .into_iter()
                .map(|permission| permission.as_str().to_owned())
                .collect(),
            features: access
                .features
                .into_iter()
                .map(|feature| feature.as_str().to_owned())
                .collect(),
            active_plan_tier: access.active_plan_tier.map(|tier| tier.as_str().to_owned()),
        }
    }
}
