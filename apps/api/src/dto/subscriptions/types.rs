use dancerealmx_domain::SubscriptionEvent;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Normalized subscription lifecycle event posted by billing.
///
/// `event` is tagged by `event_type` (`activated`, `cancelled` or `expired`).
/// Activation carries `plan_id` and an optional RFC 3339 `current_period_end`.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/subscription-event-request.ts"
)]
pub struct SubscriptionEventRequest {
    pub user_id: String,
    #[ts(type = "Record<string, unknown>")]
    pub event: SubscriptionEvent,
}

/// Outcome of a lifecycle event.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/subscription-change-response.ts"
)]
pub struct SubscriptionChangeResponse {
    pub plan_id: String,
    pub status: String,
    pub granted_roles: Vec<String>,
    pub revoked_roles: Vec<String>,
}
