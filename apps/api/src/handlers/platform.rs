//! Product surfaces gated by route-level access requirements.
//!
//! Handlers here assume the guard already ran; they only shape the response.

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use dancerealmx_core::{AppError, UserIdentity};
use uuid::Uuid;

use crate::dto::{CreateResourceRequest, ResourceDraftResponse, SurfaceResponse};
use crate::error::ApiResult;

pub async fn create_resource_handler(
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateResourceRequest>,
) -> ApiResult<(StatusCode, Json<ResourceDraftResponse>)> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("resource title must not be empty".to_owned()).into());
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(ResourceDraftResponse {
            resource_id: Uuid::new_v4().to_string(),
            seller_id: user.user_id().to_string(),
            title: title.to_owned(),
            price_cents: payload.price_cents,
        }),
    ))
}

pub async fn manage_bookings_handler(
    Extension(user): Extension<UserIdentity>,
) -> Json<SurfaceResponse> {
    surface("bookings.manage", &user)
}

pub async fn analytics_handler(Extension(user): Extension<UserIdentity>) -> Json<SurfaceResponse> {
    surface("analytics", &user)
}

pub async fn certifications_handler(
    Extension(user): Extension<UserIdentity>,
) -> Json<SurfaceResponse> {
    surface("certifications", &user)
}

fn surface(name: &'static str, user: &UserIdentity) -> Json<SurfaceResponse> {
    Json(SurfaceResponse {
        surface: name,
        user_id: user.user_id().to_string(),
    })
}
