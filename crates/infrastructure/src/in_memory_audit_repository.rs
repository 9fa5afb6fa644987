//! Append-only audit log kept in memory and mirrored to tracing output.

use async_trait::async_trait;
use dancerealmx_application::{AuditEvent, AuditRepository};
use dancerealmx_core::AppResult;
use tokio::sync::RwLock;
use tracing::info;

/// Development audit repository.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty audit log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all events in append order.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        info!(
            actor = event.actor.as_str(),
            target_user = %event.target_user,
            action = event.action.as_str(),
            resource_type = event.resource_type.as_str(),
            resource_id = event.resource_id.as_str(),
            detail = event.detail.as_deref().unwrap_or_default(),
            "audit event"
        );
        self.events.write().await.push(event);

        Ok(())
    }
}
