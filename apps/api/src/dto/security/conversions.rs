use dancerealmx_application::{RoleAssignment, RoleGrantSource};

use super::types::RoleAssignmentResponse;

impl From<RoleAssignment> for RoleAssignmentResponse {
    fn from(value: RoleAssignment) -> Self {
        let (source, plan_id) = match value.source {
            RoleGrantSource::Base => ("base", None),
            RoleGrantSource::Plan(plan_id) => ("plan", Some(plan_id.as_str().to_owned())),
        };

        Self {
            role: value.role.as_str().to_owned(),
            source: source.to_owned(),
            plan_id,
            assigned_at: value.assigned_at.to_rfc3339(),
        }
    }
}
