use dancerealmx_application::{AccessService, RoleAssignmentService, SubscriptionService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub role_assignment_service: RoleAssignmentService,
    pub subscription_service: SubscriptionService,
}
