use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dancerealmx_application::{
    AccessSubjectRepository, RoleAssignment, RoleAssignmentRepository, RoleGrantOutcome,
    RoleGrantSource, SubscriptionRepository, UserAccessRecord,
};
use dancerealmx_core::{AppResult, UserId};
use dancerealmx_domain::{Role, SubscriptionSnapshot};
use tokio::sync::RwLock;
use tracing::debug;

mod roles;
mod subscriptions;
#[cfg(test)]
mod tests;

/// In-memory store for role assignments and subscriptions.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    assignments: RwLock<HashMap<UserId, Vec<RoleAssignment>>>,
    legacy_role_tags: RwLock<HashMap<UserId, Vec<String>>>,
    subscriptions: RwLock<HashMap<UserId, SubscriptionSnapshot>>,
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw role tag imported from an older data source.
    ///
    /// Tags are kept verbatim and surface in access records as-is.
    pub async fn import_role_tag(&self, user_id: UserId, tag: impl Into<String>) {
        self.legacy_role_tags
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(tag.into());
    }
}

#[async_trait]
impl AccessSubjectRepository for InMemoryAccessRepository {
    async fn find_access_record(&self, user_id: UserId) -> AppResult<Option<UserAccessRecord>> {
        let assignments = self.assignments.read().await;
        let legacy_role_tags = self.legacy_role_tags.read().await;
        let subscriptions = self.subscriptions.read().await;

        let held = assignments.get(&user_id);
        let legacy = legacy_role_tags.get(&user_id);
        let subscription = subscriptions.get(&user_id);
        if held.is_none() && legacy.is_none() && subscription.is_none() {
            debug!(user_id = %user_id, "no access record for user");
            return Ok(None);
        }

        let role_tags = held
            .into_iter()
            .flatten()
            .map(|assignment| assignment.role.as_str().to_owned())
            .chain(legacy.into_iter().flatten().cloned())
            .collect();

        Ok(Some(UserAccessRecord {
            role_tags,
            subscriptions: subscription.cloned().into_iter().collect(),
        }))
    }
}
