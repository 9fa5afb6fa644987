use serde::Serialize;
use ts_rs::TS;

/// Roles, permissions and features of the authenticated user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/effective-access-response.ts"
)]
pub struct EffectiveAccessResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub inherited_roles: Vec<String>,
    pub permissions: Vec<String>,
    pub features: Vec<String>,
    pub active_plan_tier: Option<String>,
}

/// Result of a single feature gate query.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/feature-access-response.ts"
)]
pub struct FeatureAccessResponse {
    pub feature_key: String,
    pub allowed: bool,
}

/// Resolved permission set of one role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-permissions-response.ts"
)]
pub struct RolePermissionsResponse {
    pub role: String,
    pub inherited_roles: Vec<String>,
    pub permissions: Vec<String>,
}

/// API representation of a seeded subscription plan.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/subscription-plan-response.ts"
)]
pub struct SubscriptionPlanResponse {
    pub plan_id: String,
    pub tier: String,
    pub name: String,
    pub monthly_price_cents: u32,
    pub yearly_price_cents: u32,
    pub features: Vec<String>,
    pub unlocked_roles: Vec<String>,
}
