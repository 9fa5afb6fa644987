use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use dancerealmx_core::AppResult;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;
mod guarded;
#[cfg(test)]
mod tests;

use cors::build_cors_layer;
use guarded::build_guarded_routes;

pub fn build_router(app_state: AppState, frontend_url: &str) -> AppResult<Router> {
    let cors_layer = build_cors_layer(frontend_url)?;

    let protected_routes = Router::new()
        .route(
            "/api/access/me",
            get(handlers::access::effective_access_handler),
        )
        .route(
            "/api/access/register",
            post(handlers::access::register_handler),
        )
        .route(
            "/api/access/features/{feature_key}",
            get(handlers::access::feature_access_handler),
        )
        .route(
            "/api/access/roles/{role}/permissions",
            get(handlers::access::role_permissions_handler),
        )
        .route(
            "/api/subscriptions/plans",
            get(handlers::subscriptions::list_plans_handler),
        )
        .route(
            "/api/security/users/{user_id}/roles",
            get(handlers::security::list_role_assignments_handler),
        )
        .merge(build_guarded_routes(&app_state)?)
        .route_layer(from_fn(middleware::require_auth));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
