use std::sync::Arc;

use dancerealmx_application::{
    AccessService, AuditRepository, RoleAssignmentService, SubscriptionService,
};
use dancerealmx_domain::{AccessPolicy, Role};
use dancerealmx_infrastructure::InMemoryAccessRepository;

use crate::state::AppState;

/// Wires application services over the shared access store.
pub fn build_app_state(
    policy: Arc<AccessPolicy>,
    access_repository: Arc<InMemoryAccessRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    default_registration_role: Role,
) -> AppState {
    let access_service = AccessService::new(policy, access_repository.clone());
    let role_assignment_service = RoleAssignmentService::new(
        access_service.clone(),
        access_repository.clone(),
        audit_repository.clone(),
        default_registration_role,
    );
    let subscription_service = SubscriptionService::new(
        access_service.clone(),
        access_repository.clone(),
        access_repository,
        audit_repository,
    );

    AppState {
        access_service,
        role_assignment_service,
        subscription_service,
    }
}
