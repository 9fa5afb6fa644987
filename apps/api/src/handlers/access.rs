use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use dancerealmx_core::UserIdentity;
use dancerealmx_domain::Role;

use crate::dto::{EffectiveAccessResponse, FeatureAccessResponse, RolePermissionsResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn effective_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<EffectiveAccessResponse>> {
    let access = state.access_service.effective_access(&user).await?;

    Ok(Json(EffectiveAccessResponse::from_effective_access(
        &user, access,
    )))
}

/// Grants the registration default role to the caller. Repeat calls are no-ops.
pub async fn register_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<StatusCode> {
    state
        .role_assignment_service
        .register_user(user.user_id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn feature_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(feature_key): Path<String>,
) -> ApiResult<Json<FeatureAccessResponse>> {
    let allowed = state
        .access_service
        .check_feature_access(&user, feature_key.as_str())
        .await?;

    Ok(Json(FeatureAccessResponse {
        feature_key,
        allowed,
    }))
}

/// Unknown role tags resolve to an empty permission set rather than an error.
pub async fn role_permissions_handler(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Json<RolePermissionsResponse> {
    let policy = state.access_service.policy();
    let inherited_roles = role
        .parse::<Role>()
        .map(|role| policy.inherited_roles(role))
        .unwrap_or_default();
    let permissions = policy.all_permissions_for_tag(role.as_str());

    Json(RolePermissionsResponse {
        role,
        inherited_roles: inherited_roles
            .iter()
            .map(|role| role.as_str().to_owned())
            .collect(),
        permissions: permissions
            .iter()
            .map(|permission| permission.as_str().to_owned())
            .collect(),
    })
}
