use super::*;

#[async_trait]
impl RoleAssignmentRepository for InMemoryAccessRepository {
    async fn list_role_assignments(&self, user_id: UserId) -> AppResult<Vec<RoleAssignment>> {
        let mut assignments = self
            .assignments
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        assignments.sort_by_key(|assignment| assignment.role);

        Ok(assignments)
    }

    async fn grant_role(
        &self,
        user_id: UserId,
        role: Role,
        source: RoleGrantSource,
    ) -> AppResult<RoleGrantOutcome> {
        let mut assignments = self.assignments.write().await;
        let held = assignments.entry(user_id).or_default();

        if let Some(existing) = held.iter_mut().find(|assignment| assignment.role == role) {
            if existing.source == RoleGrantSource::Base || existing.source == source {
                return Ok(RoleGrantOutcome::Unchanged);
            }
            existing.source = source;
            debug!(user_id = %user_id, role = role.as_str(), "changed role grant source");
            return Ok(RoleGrantOutcome::SourceChanged);
        }

        held.push(RoleAssignment {
            role,
            source,
            assigned_at: Utc::now(),
        });
        debug!(user_id = %user_id, role = role.as_str(), "stored role assignment");

        Ok(RoleGrantOutcome::Inserted)
    }

    async fn remove_role(&self, user_id: UserId, role: Role) -> AppResult<bool> {
        let mut assignments = self.assignments.write().await;
        let Some(held) = assignments.get_mut(&user_id) else {
            return Ok(false);
        };

        let before = held.len();
        held.retain(|assignment| assignment.role != role);
        let removed = held.len() != before;
        if removed {
            debug!(user_id = %user_id, role = role.as_str(), "removed role assignment");
        }

        Ok(removed)
    }
}
