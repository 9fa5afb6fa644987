use axum::Json;
use axum::extract::{Extension, State};
use dancerealmx_core::UserIdentity;

use crate::dto::{SubscriptionChangeResponse, SubscriptionEventRequest, SubscriptionPlanResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_plans_handler(
    State(state): State<AppState>,
) -> Json<Vec<SubscriptionPlanResponse>> {
    let mut plans: Vec<SubscriptionPlanResponse> = state
        .access_service
        .policy()
        .plans()
        .map(SubscriptionPlanResponse::from)
        .collect();
    plans.sort_by_key(|plan| plan.monthly_price_cents);

    Json(plans)
}

pub async fn apply_subscription_event_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SubscriptionEventRequest>,
) -> ApiResult<Json<SubscriptionChangeResponse>> {
    let (user_id, event) = payload.try_into_event()?;
    let change = state
        .subscription_service
        .apply_event(&user, user_id, event)
        .await?;

    Ok(Json(SubscriptionChangeResponse::from(change)))
}
