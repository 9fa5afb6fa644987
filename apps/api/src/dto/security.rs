mod conversions;
mod types;

pub use types::{AssignRoleRequest, RemoveRoleAssignmentRequest, RoleAssignmentResponse};
