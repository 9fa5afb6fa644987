//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod access_service;
mod role_assignment_service;
mod subscription_service;

#[cfg(test)]
mod test_support;

pub use access_ports::{
    AccessSubjectRepository, AuditEvent, AuditRepository, RoleAssignment,
    RoleAssignmentRepository, RoleGrantOutcome, RoleGrantSource, SubscriptionRepository,
    UserAccessRecord,
};
pub use access_service::{AccessService, EffectiveAccess};
pub use role_assignment_service::{RoleAssignmentService, SYSTEM_ACTOR};
pub use subscription_service::{SubscriptionChange, SubscriptionService};
