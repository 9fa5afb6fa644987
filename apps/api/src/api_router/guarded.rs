use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use dancerealmx_core::AppResult;
use dancerealmx_domain::{AccessRequirement, FeatureKey, Permission, PlanTier, Role};

use crate::handlers;
use crate::middleware::{self, AccessGuard};
use crate::state::AppState;

pub(super) fn build_guarded_routes(app_state: &AppState) -> AppResult<Router<AppState>> {
    let resource_routes = guarded(
        app_state,
        AccessRequirement::Feature(FeatureKey::new("sell_resources")?),
        Router::new().route(
            "/api/resources",
            post(handlers::platform::create_resource_handler),
        ),
    );

    let booking_routes = guarded(
        app_state,
        AccessRequirement::AnyRole(vec![Role::BookingProfessional, Role::InstructorAdmin]),
        Router::new().route(
            "/api/bookings/manage",
            get(handlers::platform::manage_bookings_handler),
        ),
    );

    let analytics_routes = guarded(
        app_state,
        AccessRequirement::AllPermissions(vec![Permission::new("view:analytics")?]),
        Router::new().route("/api/analytics", get(handlers::platform::analytics_handler)),
    );

    let certification_routes = guarded(
        app_state,
        AccessRequirement::MinimumPlan(PlanTier::Gold),
        Router::new().route(
            "/api/certifications",
            get(handlers::platform::certifications_handler),
        ),
    );

    let subscription_admin_routes = guarded(
        app_state,
        AccessRequirement::AllPermissions(vec![Permission::new("manage:subscriptions")?]),
        Router::new().route(
            "/api/subscriptions/events",
            post(handlers::subscriptions::apply_subscription_event_handler),
        ),
    );

    let role_admin_routes = guarded(
        app_state,
        AccessRequirement::AllPermissions(vec![Permission::new("manage:roles")?]),
        Router::new().route(
            "/api/security/roles",
            post(handlers::security::assign_role_handler)
                .delete(handlers::security::unassign_role_handler),
        ),
    );

    Ok(Router::new()
        .merge(resource_routes)
        .merge(booking_routes)
        .merge(analytics_routes)
        .merge(certification_routes)
        .merge(subscription_admin_routes)
        .merge(role_admin_routes))
}

fn guarded(
    app_state: &AppState,
    requirement: AccessRequirement,
    routes: Router<AppState>,
) -> Router<AppState> {
    routes.route_layer(from_fn_with_state(
        AccessGuard::new(app_state.access_service.clone(), requirement),
        middleware::require_access,
    ))
}
