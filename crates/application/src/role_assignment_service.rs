use std::sync::Arc;

use dancerealmx_core::{AppError, AppResult, UserId, UserIdentity};
use dancerealmx_domain::{AccessRequirement, AuditAction, Permission, Role};

use crate::{
    AccessService, AuditEvent, AuditRepository, RoleAssignment, RoleAssignmentRepository,
    RoleGrantOutcome, RoleGrantSource,
};

/// Actor label used for grants performed by the platform itself.
pub const SYSTEM_ACTOR: &str = "system";

const ROLE_MANAGE_PERMISSION: &str = "manage:roles";

/// Application service for registration defaults and administrative role changes.
#[derive(Clone)]
pub struct RoleAssignmentService {
    access_service: AccessService,
    repository: Arc<dyn RoleAssignmentRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    default_role: Role,
}

impl RoleAssignmentService {
    /// Creates a new role assignment service.
    #[must_use]
    pub fn new(
        access_service: AccessService,
        repository: Arc<dyn RoleAssignmentRepository>,
        audit_repository: Arc<dyn AuditRepository>,
        default_role: Role,
    ) -> Self {
        Self {
            access_service,
            repository,
            audit_repository,
            default_role,
        }
    }

    /// Grants the registration default role to a new user.
    pub async fn register_user(&self, user_id: UserId) -> AppResult<()> {
        let outcome = self
            .repository
            .grant_role(user_id, self.default_role, RoleGrantSource::Base)
            .await?;

        if outcome != RoleGrantOutcome::Unchanged {
            self.append_role_event(
                SYSTEM_ACTOR,
                user_id,
                self.default_role,
                AuditAction::SecurityRoleAssigned,
                "registration default",
            )
            .await?;
        }

        Ok(())
    }

    /// Lists a user's roles. Users may list their own; others need `manage:roles`.
    pub async fn list_role_assignments(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<Vec<RoleAssignment>> {
        if actor.user_id() != user_id {
            self.require_role_manage_permission(actor).await?;
        }

        self.repository.list_role_assignments(user_id).await
    }

    /// Grants a base role to a user and emits an audit event.
    ///
    /// A role held only through a plan is promoted to a base grant so it
    /// survives the plan lapsing.
    pub async fn assign_role(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        role: Role,
    ) -> AppResult<()> {
        self.require_role_manage_permission(actor).await?;

        let outcome = self
            .repository
            .grant_role(user_id, role, RoleGrantSource::Base)
            .await?;
        let reason = match outcome {
            RoleGrantOutcome::Inserted => "administrative grant",
            RoleGrantOutcome::SourceChanged => "promoted from plan grant",
            RoleGrantOutcome::Unchanged => {
                return Err(AppError::Conflict(format!(
                    "user '{user_id}' already holds role '{role}'"
                )));
            }
        };

        self.append_role_event(
            actor.user_id().to_string().as_str(),
            user_id,
            role,
            AuditAction::SecurityRoleAssigned,
            reason,
        )
        .await
    }

    /// Revokes a role from a user and emits an audit event.
    pub async fn revoke_role(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        role: Role,
    ) -> AppResult<()> {
        self.require_role_manage_permission(actor).await?;

        let removed = self.repository.remove_role(user_id, role).await?;
        if !removed {
            return Err(AppError::NotFound(format!(
                "user '{user_id}' does not hold role '{role}'"
            )));
        }

        self.append_role_event(
            actor.user_id().to_string().as_str(),
            user_id,
            role,
            AuditAction::SecurityRoleUnassigned,
            "administrative revoke",
        )
        .await
    }

    async fn require_role_manage_permission(&self, actor: &UserIdentity) -> AppResult<()> {
        let requirement =
            AccessRequirement::AllPermissions(vec![Permission::new(ROLE_MANAGE_PERMISSION)?]);
        self.access_service.require(actor, &requirement).await
    }

    async fn append_role_event(
        &self,
        actor: &str,
        user_id: UserId,
        role: Role,
        action: AuditAction,
        reason: &str,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                actor: actor.to_owned(),
                target_user: user_id,
                action,
                resource_type: "user_role".to_owned(),
                resource_id: format!("{user_id}:{role}"),
                detail: Some(format!("{} role '{role}' ({reason})", action_verb(action))),
            })
            .await
    }
}

fn action_verb(action: AuditAction) -> &'static str {
    match action {
        AuditAction::SecurityRoleUnassigned => "revoked",
        _ => "granted",
    }
}
