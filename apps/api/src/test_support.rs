use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use dancerealmx_application::{RoleAssignmentRepository, RoleGrantOutcome, RoleGrantSource};
use dancerealmx_core::UserId;
use dancerealmx_domain::{AccessPolicy, Role};
use dancerealmx_infrastructure::{InMemoryAccessRepository, InMemoryAuditRepository};
use serde_json::Value;
use tower::ServiceExt;

use crate::api_services::build_app_state;
use crate::middleware::{AUTHENTICATED_NAME_HEADER, AUTHENTICATED_USER_HEADER};
use crate::state::AppState;

pub(crate) fn test_state() -> (AppState, Arc<InMemoryAccessRepository>) {
    let Ok(policy) = AccessPolicy::builtin() else {
        panic!("built-in policy must be valid");
    };
    let access_repository = Arc::new(InMemoryAccessRepository::new());
    let state = build_app_state(
        Arc::new(policy),
        access_repository.clone(),
        Arc::new(InMemoryAuditRepository::new()),
        Role::Student,
    );

    (state, access_repository)
}

pub(crate) async fn seed_user(repository: &InMemoryAccessRepository, role: Role) -> UserId {
    let user_id = UserId::new();
    let granted = repository
        .grant_role(user_id, role, RoleGrantSource::Base)
        .await;
    assert!(matches!(granted, Ok(RoleGrantOutcome::Inserted)));
    user_id
}

pub(crate) fn request(
    method: Method,
    uri: &str,
    user_id: Option<UserId>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder
            .header(AUTHENTICATED_USER_HEADER, user_id.to_string())
            .header(AUTHENTICATED_NAME_HEADER, "Dana Dancer");
    }

    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let Ok(request) = builder.body(body) else {
        panic!("test request must build");
    };
    request
}

pub(crate) async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let Ok(response) = app.oneshot(request).await else {
        panic!("router is infallible");
    };
    let status = response.status();
    let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
        panic!("response body must be readable");
    };
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}
