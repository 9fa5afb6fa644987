use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dancerealmx_core::{AppResult, UserId};
use dancerealmx_domain::{AuditAction, PlanId, Role, SubscriptionSnapshot};

/// Raw authorization record for one user as stored by the data layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAccessRecord {
    /// Stored role tags. Tags that are not known roles are ignored.
    pub role_tags: Vec<String>,
    /// Subscription snapshots in any status.
    pub subscriptions: Vec<SubscriptionSnapshot>,
}

/// Why a user holds a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleGrantSource {
    /// Granted at registration or by an administrator.
    Base,
    /// Granted while a subscription on this plan is active.
    Plan(PlanId),
}

/// Effect of a role grant on the stored assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGrantOutcome {
    /// The role was not held and is now stored.
    Inserted,
    /// The role was held through a plan and now carries the requested source.
    SourceChanged,
    /// Nothing changed.
    Unchanged,
}

/// One role held by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    /// Held role.
    pub role: Role,
    /// Grant origin.
    pub source: RoleGrantSource,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}

/// Port for loading the authorization input of a user.
#[async_trait]
pub trait AccessSubjectRepository: Send + Sync {
    /// Returns the stored record, or `None` when the user is unknown.
    async fn find_access_record(&self, user_id: UserId) -> AppResult<Option<UserAccessRecord>>;
}

/// Port for user-role assignments.
#[async_trait]
pub trait RoleAssignmentRepository: Send + Sync {
    /// Lists roles currently held by a user.
    async fn list_role_assignments(&self, user_id: UserId) -> AppResult<Vec<RoleAssignment>>;

    /// Grants a role and reports what changed.
    ///
    /// A `Base` grant is never downgraded to a plan grant. A plan grant takes
    /// the requested source, which promotes it to `Base` or re-points it to
    /// the newer plan.
    async fn grant_role(
        &self,
        user_id: UserId,
        role: Role,
        source: RoleGrantSource,
    ) -> AppResult<RoleGrantOutcome>;

    /// Removes a role. Returns `false` when the role was not held.
    async fn remove_role(&self, user_id: UserId, role: Role) -> AppResult<bool>;
}

/// Port for the single current subscription of each user.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Returns the user's current subscription, if any.
    async fn find_subscription(&self, user_id: UserId) -> AppResult<Option<SubscriptionSnapshot>>;

    /// Stores the user's current subscription, replacing the previous one.
    async fn save_subscription(
        &self,
        user_id: UserId,
        subscription: SubscriptionSnapshot,
    ) -> AppResult<()>;

    /// Lists active subscriptions whose paid period ended at or before `now`.
    async fn list_lapsed_subscriptions(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<(UserId, SubscriptionSnapshot)>>;
}

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Actor that performed the action, or `system` for scheduled work.
    pub actor: String,
    /// User the action applied to.
    pub target_user: UserId,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Resource type label.
    pub resource_type: String,
    /// Resource identifier.
    pub resource_id: String,
    /// Optional audit detail payload.
    pub detail: Option<String>,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
