mod access;
mod common;
mod platform;
mod security;
mod subscriptions;

pub use access::{
    EffectiveAccessResponse, FeatureAccessResponse, RolePermissionsResponse,
    SubscriptionPlanResponse,
};
pub use common::{AccessDeniedResponse, ErrorResponse, HealthResponse};
pub use platform::{CreateResourceRequest, ResourceDraftResponse, SurfaceResponse};
pub use security::{AssignRoleRequest, RemoveRoleAssignmentRequest, RoleAssignmentResponse};
pub use subscriptions::{SubscriptionChangeResponse, SubscriptionEventRequest};
