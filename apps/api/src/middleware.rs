use std::sync::Arc;

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dancerealmx_application::AccessService;
use dancerealmx_core::{AppError, UserId, UserIdentity};
use dancerealmx_domain::AccessRequirement;

use crate::dto::AccessDeniedResponse;
use crate::error::ApiResult;

/// Trusted header carrying the authenticated user id, set by the identity gateway.
pub const AUTHENTICATED_USER_HEADER: &str = "x-authenticated-user";
/// Optional display name forwarded by the identity gateway.
pub const AUTHENTICATED_NAME_HEADER: &str = "x-authenticated-name";
/// Optional email forwarded by the identity gateway.
pub const AUTHENTICATED_EMAIL_HEADER: &str = "x-authenticated-email";

pub async fn require_auth(mut request: Request, next: Next) -> ApiResult<Response> {
    let identity = identity_from_headers(request.headers())?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Route guard state: the requirement a route enforces.
#[derive(Clone)]
pub struct AccessGuard {
    access_service: AccessService,
    requirement: Arc<AccessRequirement>,
}

impl AccessGuard {
    pub fn new(access_service: AccessService, requirement: AccessRequirement) -> Self {
        Self {
            access_service,
            requirement: Arc::new(requirement),
        }
    }
}

pub async fn require_access(
    State(guard): State<AccessGuard>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let user = request
        .extensions()
        .get::<UserIdentity>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    match guard.access_service.require(&user, &guard.requirement).await {
        Ok(()) => Ok(next.run(request).await),
        Err(AppError::Forbidden(_)) => Ok(access_denied_response(&guard.requirement)),
        Err(error) => Err(error.into()),
    }
}

fn access_denied_response(requirement: &AccessRequirement) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(AccessDeniedResponse {
            message: "insufficient access".to_owned(),
            requirement: requirement.to_string(),
        }),
    )
        .into_response()
}

fn identity_from_headers(headers: &HeaderMap) -> Result<UserIdentity, AppError> {
    let user_id = header_value(headers, AUTHENTICATED_USER_HEADER)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let user_id = UserId::parse(user_id).map_err(|_| {
        AppError::Unauthorized(format!("malformed {AUTHENTICATED_USER_HEADER} header"))
    })?;

    let display_name = header_value(headers, AUTHENTICATED_NAME_HEADER).unwrap_or_default();
    let email = header_value(headers, AUTHENTICATED_EMAIL_HEADER).map(str::to_owned);

    Ok(UserIdentity::new(user_id, display_name, email))
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
