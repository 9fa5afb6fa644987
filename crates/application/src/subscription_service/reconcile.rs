use super::*;

impl SubscriptionService {
    /// Grants every role the plan unlocks, recording the plan as the source.
    pub(super) async fn grant_plan_roles(
        &self,
        actor: &str,
        user_id: UserId,
        plan_id: &PlanId,
        roles: &BTreeSet<Role>,
    ) -> AppResult<BTreeSet<Role>> {
        let mut granted = BTreeSet::new();

        for role in roles {
            let outcome = self
                .roles
                .grant_role(user_id, *role, RoleGrantSource::Plan(plan_id.clone()))
                .await?;
            if outcome != RoleGrantOutcome::Inserted {
                continue;
            }

            self.append_role_event(
                actor,
                user_id,
                *role,
                AuditAction::SecurityRoleAssigned,
                plan_id,
            )
            .await?;
            granted.insert(*role);
        }

        Ok(granted)
    }

    /// Removes the given roles where they are held only through a plan.
    ///
    /// Base grants are left untouched.
    pub(super) async fn revoke_plan_roles(
        &self,
        actor: &str,
        user_id: UserId,
        roles: &BTreeSet<Role>,
    ) -> AppResult<BTreeSet<Role>> {
        if roles.is_empty() {
            return Ok(BTreeSet::new());
        }

        let assignments = self.roles.list_role_assignments(user_id).await?;
        let mut revoked = BTreeSet::new();

        for assignment in assignments {
            let RoleGrantSource::Plan(plan_id) = &assignment.source else {
                continue;
            };
            if !roles.contains(&assignment.role) {
                continue;
            }
            if !self.roles.remove_role(user_id, assignment.role).await? {
                continue;
            }

            self.append_role_event(
                actor,
                user_id,
                assignment.role,
                AuditAction::SecurityRoleUnassigned,
                plan_id,
            )
            .await?;
            revoked.insert(assignment.role);
        }

        Ok(revoked)
    }

    async fn append_role_event(
        &self,
        actor: &str,
        user_id: UserId,
        role: Role,
        action: AuditAction,
        plan_id: &PlanId,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                actor: actor.to_owned(),
                target_user: user_id,
                action,
                resource_type: "user_role".to_owned(),
                resource_id: format!("{user_id}:{role}"),
                detail: Some(format!("{} role '{role}' (plan '{plan_id}')", action.as_str())),
            })
            .await
    }
}
