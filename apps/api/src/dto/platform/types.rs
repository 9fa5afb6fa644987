use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Marketplace listing submitted by a curriculum seller.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-resource-request.ts"
)]
pub struct CreateResourceRequest {
    pub title: String,
    pub price_cents: u32,
}

/// Accepted marketplace listing draft.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/resource-draft-response.ts"
)]
pub struct ResourceDraftResponse {
    pub resource_id: String,
    pub seller_id: String,
    pub title: String,
    pub price_cents: u32,
}

/// Confirms that a gated surface was reached.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/surface-response.ts"
)]
pub struct SurfaceResponse {
    pub surface: &'static str,
    pub user_id: String,
}
