use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dancerealmx_core::{AppError, AppResult, UserId, UserIdentity};
use dancerealmx_domain::{
    AccessRequirement, AuditAction, Permission, PlanId, Role, SubscriptionEvent,
    SubscriptionSnapshot, SubscriptionStatus,
};

use tracing::{debug, info, warn};

use crate::role_assignment_service::SYSTEM_ACTOR;
use crate::{
    AccessService, AuditEvent, AuditRepository, RoleAssignmentRepository, RoleGrantOutcome,
    RoleGrantSource, SubscriptionRepository,
};

mod reconcile;

const SUBSCRIPTION_MANAGE_PERMISSION: &str = "manage:subscriptions";

/// Result of applying one lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    /// Plan of the subscription after the event.
    pub plan_id: PlanId,
    /// Status after the event.
    pub status: SubscriptionStatus,
    /// Roles newly granted by the event.
    pub granted_roles: BTreeSet<Role>,
    /// Roles removed by the event.
    pub revoked_roles: BTreeSet<Role>,
}

/// Application service driving the subscription lifecycle and the roles it unlocks.
#[derive(Clone)]
pub struct SubscriptionService {
    access_service: AccessService,
    subscriptions: Arc<dyn SubscriptionRepository>,
    roles: Arc<dyn RoleAssignmentRepository>,
    audit_repository: Arc<dyn AuditRepository>,
}

impl SubscriptionService {
    /// Creates a new subscription service.
    #[must_use]
    pub fn new(
        access_service: AccessService,
        subscriptions: Arc<dyn SubscriptionRepository>,
        roles: Arc<dyn RoleAssignmentRepository>,
        audit_repository: Arc<dyn AuditRepository>,
    ) -> Self {
        Self {
            access_service,
            subscriptions,
            roles,
            audit_repository,
        }
    }

    /// Applies a normalized lifecycle event on behalf of an operator or the
    /// payment integration. Requires `manage:subscriptions`.
    pub async fn apply_event(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        event: SubscriptionEvent,
    ) -> AppResult<SubscriptionChange> {
        let requirement = AccessRequirement::AllPermissions(vec![Permission::new(
            SUBSCRIPTION_MANAGE_PERMISSION,
        )?]);
        self.access_service.require(actor, &requirement).await?;

        self.apply_event_as(actor.user_id().to_string().as_str(), user_id, event)
            .await
    }

    /// Expires every active subscription whose paid period has ended.
    ///
    /// Each listed user is re-checked before expiry, so a renewal stored after
    /// the listing is kept. A failing user is logged and skipped. Returns the
    /// users whose subscription was expired.
    pub async fn expire_lapsed(&self, now: DateTime<Utc>) -> AppResult<Vec<UserId>> {
        let lapsed = self.subscriptions.list_lapsed_subscriptions(now).await?;

        let mut expired = Vec::with_capacity(lapsed.len());
        for (user_id, _) in lapsed {
            match self.expire_if_lapsed(user_id, now).await {
                Ok(true) => expired.push(user_id),
                Ok(false) => {
                    debug!(user_id = %user_id, "subscription no longer lapsed, skipping");
                }
                Err(error) => {
                    warn!(user_id = %user_id, error = %error, "failed to expire subscription");
                }
            }
        }

        Ok(expired)
    }

    async fn expire_if_lapsed(&self, user_id: UserId, now: DateTime<Utc>) -> AppResult<bool> {
        let Some(current) = self.subscriptions.find_subscription(user_id).await? else {
            return Ok(false);
        };
        if !current.is_lapsed_at(now) {
            return Ok(false);
        }

        let change = self
            .end(SYSTEM_ACTOR, user_id, current, SubscriptionStatus::Expired)
            .await?;
        info!(
            user_id = %user_id,
            plan_id = %change.plan_id,
            revoked_roles = change.revoked_roles.len(),
            "expired lapsed subscription"
        );

        Ok(true)
    }

    async fn apply_event_as(
        &self,
        actor: &str,
        user_id: UserId,
        event: SubscriptionEvent,
    ) -> AppResult<SubscriptionChange> {
        let current = self.subscriptions.find_subscription(user_id).await?;
        let target = event.target_status();

        let change = match event {
            SubscriptionEvent::Activated {
                plan_id,
                current_period_end,
            } => {
                self.activate(actor, user_id, current, plan_id, current_period_end)
                    .await
            }
            SubscriptionEvent::Cancelled | SubscriptionEvent::Expired => {
                let Some(current) = current else {
                    return Err(AppError::NotFound(format!(
                        "user '{user_id}' has no subscription"
                    )));
                };
                self.end(actor, user_id, current, target).await
            }
        }?;

        info!(
            actor,
            user_id = %user_id,
            plan_id = %change.plan_id,
            status = change.status.as_str(),
            granted_roles = change.granted_roles.len(),
            revoked_roles = change.revoked_roles.len(),
            "applied subscription event"
        );

        Ok(change)
    }

    async fn activate(
        &self,
        actor: &str,
        user_id: UserId,
        current: Option<SubscriptionSnapshot>,
        plan_id: PlanId,
        current_period_end: Option<DateTime<Utc>>,
    ) -> AppResult<SubscriptionChange> {
        let policy = self.access_service.policy();
        let Some(plan) = policy.plan(&plan_id) else {
            return Err(AppError::NotFound(format!(
                "subscription plan '{plan_id}' does not exist"
            )));
        };

        let previous_roles = current
            .as_ref()
            .filter(|subscription| subscription.is_active() && subscription.plan_id != plan_id)
            .map(|subscription| policy.roles_unlocked_by(&subscription.plan_id))
            .unwrap_or_default();
        let unlocked_roles = policy.roles_unlocked_by(&plan_id);

        self.subscriptions
            .save_subscription(
                user_id,
                SubscriptionSnapshot::active(plan, current_period_end),
            )
            .await?;
        self.append_subscription_event(
            actor,
            user_id,
            &plan_id,
            AuditAction::SubscriptionActivated,
        )
        .await?;

        let stale_roles = previous_roles
            .difference(&unlocked_roles)
            .copied()
            .collect::<BTreeSet<_>>();
        let revoked_roles = self
            .revoke_plan_roles(actor, user_id, &stale_roles)
            .await?;
        let granted_roles = self
            .grant_plan_roles(actor, user_id, &plan_id, &unlocked_roles)
            .await?;

        Ok(SubscriptionChange {
            plan_id,
            status: SubscriptionStatus::Active,
            granted_roles,
            revoked_roles,
        })
    }

    async fn end(
        &self,
        actor: &str,
        user_id: UserId,
        mut current: SubscriptionSnapshot,
        target: SubscriptionStatus,
    ) -> AppResult<SubscriptionChange> {
        let was_active = current.is_active();
        let next = current.status.transition_to(target)?;
        if next == current.status {
            return Ok(SubscriptionChange {
                plan_id: current.plan_id,
                status: next,
                granted_roles: BTreeSet::new(),
                revoked_roles: BTreeSet::new(),
            });
        }

        current.status = next;
        let plan_id = current.plan_id.clone();
        self.subscriptions.save_subscription(user_id, current).await?;

        let action = match next {
            SubscriptionStatus::Expired => AuditAction::SubscriptionExpired,
            _ => AuditAction::SubscriptionCancelled,
        };
        self.append_subscription_event(actor, user_id, &plan_id, action)
            .await?;

        let revoked_roles = if was_active {
            let plan_roles = self.access_service.policy().roles_unlocked_by(&plan_id);
            self.revoke_plan_roles(actor, user_id, &plan_roles).await?
        } else {
            BTreeSet::new()
        };

        Ok(SubscriptionChange {
            plan_id,
            status: next,
            granted_roles: BTreeSet::new(),
            revoked_roles,
        })
    }

    async fn append_subscription_event(
        &self,
        actor: &str,
        user_id: UserId,
        plan_id: &PlanId,
        action: AuditAction,
    ) -> AppResult<()> {
        self.audit_repository
            .append_event(AuditEvent {
                actor: actor.to_owned(),
                target_user: user_id,
                action,
                resource_type: "subscription".to_owned(),
                resource_id: format!("{user_id}:{plan_id}"),
                detail: Some(format!("{} plan '{plan_id}'", action.as_str())),
            })
            .await
    }
}
