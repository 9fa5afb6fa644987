use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use dancerealmx_core::{UserId, UserIdentity};
use dancerealmx_domain::Role;

use crate::dto::{AssignRoleRequest, RemoveRoleAssignmentRequest, RoleAssignmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<AssignRoleRequest>,
) -> ApiResult<StatusCode> {
    let user_id = UserId::parse(payload.user_id.as_str())?;
    let role = Role::from_transport(payload.role.as_str())?;

    state
        .role_assignment_service
        .assign_role(&user, user_id, role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn unassign_role_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<RemoveRoleAssignmentRequest>,
) -> ApiResult<StatusCode> {
    let user_id = UserId::parse(payload.user_id.as_str())?;
    let role = Role::from_transport(payload.role.as_str())?;

    state
        .role_assignment_service
        .revoke_role(&user, user_id, role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_role_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<RoleAssignmentResponse>>> {
    let user_id = UserId::parse(user_id.as_str())?;
    let assignments = state
        .role_assignment_service
        .list_role_assignments(&user, user_id)
        .await?
        .into_iter()
        .map(RoleAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}
