use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dancerealmx_core::{AppResult, UserId};
use dancerealmx_domain::{Role, SubscriptionSnapshot};
use tokio::sync::Mutex;

use crate::{
    AccessSubjectRepository, AuditEvent, AuditRepository, RoleAssignment,
    RoleAssignmentRepository, RoleGrantOutcome, RoleGrantSource, SubscriptionRepository,
    UserAccessRecord,
};

#[derive(Default)]
pub(crate) struct FakeAuditRepository {
    pub(crate) events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditRepository for FakeAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().await.push(event);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct FakeAccessStore {
    roles: Mutex<HashMap<UserId, Vec<(Role, RoleGrantSource)>>>,
    raw_tags: Mutex<HashMap<UserId, Vec<String>>>,
    subscriptions: Mutex<HashMap<UserId, SubscriptionSnapshot>>,
}

impl FakeAccessStore {
    pub(crate) async fn seed_role(&self, user_id: UserId, role: Role) {
        self.roles
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .push((role, RoleGrantSource::Base));
    }

    pub(crate) async fn seed_raw_tag(&self, user_id: UserId, tag: &str) {
        self.raw_tags
            .lock()
            .await
            .entry(user_id)
            .or_default()
            .push(tag.to_owned());
    }

    pub(crate) async fn seed_subscription(
        &self,
        user_id: UserId,
        subscription: SubscriptionSnapshot,
    ) {
        self.subscriptions.lock().await.insert(user_id, subscription);
    }

    pub(crate) async fn roles_of(&self, user_id: UserId) -> Vec<(Role, RoleGrantSource)> {
        let mut roles = self
            .roles
            .lock()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default();
        roles.sort_by_key(|(role, _)| *role);
        roles
    }

    pub(crate) async fn subscription_of(&self, user_id: UserId) -> Option<SubscriptionSnapshot> {
        self.subscriptions.lock().await.get(&user_id).cloned()
    }
}

#[async_trait]
impl AccessSubjectRepository for FakeAccessStore {
    async fn find_access_record(&self, user_id: UserId) -> AppResult<Option<UserAccessRecord>> {
        let roles = self.roles.lock().await.get(&user_id).cloned();
        let raw_tags = self.raw_tags.lock().await.get(&user_id).cloned();
        let subscription = self.subscriptions.lock().await.get(&user_id).cloned();

        if roles.is_none() && raw_tags.is_none() && subscription.is_none() {
            return Ok(None);
        }

        let mut role_tags: Vec<String> = roles
            .unwrap_or_default()
            .into_iter()
            .map(|(role, _)| role.as_str().to_owned())
            .collect();
        role_tags.extend(raw_tags.unwrap_or_default());

        Ok(Some(UserAccessRecord {
            role_tags,
            subscriptions: subscription.into_iter().collect(),
        }))
    }
}

#[async_trait]
impl RoleAssignmentRepository for FakeAccessStore {
    async fn list_role_assignments(&self, user_id: UserId) -> AppResult<Vec<RoleAssignment>> {
        Ok(self
            .roles_of(user_id)
            .await
            .into_iter()
            .map(|(role, source)| RoleAssignment {
                role,
                source,
                assigned_at: Utc::now(),
            })
            .collect())
    }

    async fn grant_role(
        &self,
        user_id: UserId,
        role: Role,
        source: RoleGrantSource,
    ) -> AppResult<RoleGrantOutcome> {
        let mut roles = self.roles.lock().await;
        let held = roles.entry(user_id).or_default();

        if let Some((_, existing)) = held.iter_mut().find(|(held_role, _)| *held_role == role) {
            if *existing == RoleGrantSource::Base || *existing == source {
                return Ok(RoleGrantOutcome::Unchanged);
            }
            *existing = source;
            return Ok(RoleGrantOutcome::SourceChanged);
        }

        held.push((role, source));
        Ok(RoleGrantOutcome::Inserted)
    }

    async fn remove_role(&self, user_id: UserId, role: Role) -> AppResult<bool> {
        let mut roles = self.roles.lock().await;
        let Some(held) = roles.get_mut(&user_id) else {
            return Ok(false);
        };

        let before = held.len();
        held.retain(|(held_role, _)| *held_role != role);
        Ok(held.len() != before)
    }
}

#[async_trait]
impl SubscriptionRepository for FakeAccessStore {
    async fn find_subscription(&self, user_id: UserId) -> AppResult<Option<SubscriptionSnapshot>> {
        Ok(self.subscription_of(user_id).await)
    }

    async fn save_subscription(
        &self,
        user_id: UserId,
        subscription: SubscriptionSnapshot,
    ) -> AppResult<()> {
        self.seed_subscription(user_id, subscription).await;
        Ok(())
    }

    async fn list_lapsed_subscriptions(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<(UserId, SubscriptionSnapshot)>> {
        Ok(self
            .subscriptions
            .lock()
            .await
            .iter()
            .filter(|(_, subscription)| subscription.is_lapsed_at(now))
            .map(|(user_id, subscription)| (*user_id, subscription.clone()))
            .collect())
    }
}
