//! Subscription plans and the per-user subscription lifecycle.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use dancerealmx_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

use crate::{FeatureKey, Role};

/// Stable identifier of a subscription plan, e.g. `gold`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlanId(String);

impl PlanId {
    /// Creates a validated plan identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into().trim().to_ascii_lowercase();
        if value.is_empty() {
            return Err(AppError::Validation("plan id must not be empty".to_owned()));
        }

        Ok(Self(value))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PlanId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for PlanId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlanId> for String {
    fn from(value: PlanId) -> Self {
        value.0
    }
}

/// Product tier of a plan. Tiers are ordered from cheapest to richest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    /// Free tier.
    Free,
    /// Silver, marketed as the Student plan.
    Silver,
    /// Gold, marketed as the Professional plan.
    Gold,
    /// Platinum tier.
    Platinum,
}

impl PlanTier {
    /// Returns a stable storage value for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

/// Seeded subscription plan definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    /// Stable plan identifier.
    pub id: PlanId,
    /// Product tier.
    pub tier: PlanTier,
    /// Marketing name.
    pub name: String,
    /// Monthly price in cents.
    pub monthly_price_cents: u32,
    /// Yearly price in cents.
    pub yearly_price_cents: u32,
    /// Features included while the plan is active.
    pub features: Vec<FeatureKey>,
    /// Roles granted while the plan is active.
    #[serde(default)]
    pub unlocked_roles: Vec<Role>,
}

/// Lifecycle state of a user's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    /// Paid up and contributing features.
    Active,
    /// Cancelled by the user or the payment provider.
    Cancelled,
    /// Billing period ended without renewal.
    Expired,
}

impl SubscriptionStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }

    /// Validates a lifecycle transition and returns the new status.
    ///
    /// Re-applying the current status is accepted so replayed provider
    /// events stay harmless.
    pub fn transition_to(self, next: Self) -> AppResult<Self> {
        match (self, next) {
            (current, next) if current == next => Ok(next),
            (Self::Active, Self::Cancelled | Self::Expired) | (Self::Cancelled, Self::Expired) => {
                Ok(next)
            }
            (current, next) => Err(AppError::Conflict(format!(
                "subscription cannot move from {} to {}",
                current.as_str(),
                next.as_str()
            ))),
        }
    }
}

/// Already-loaded view of one subscription, as supplied by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionSnapshot {
    /// Plan the subscription belongs to.
    pub plan_id: PlanId,
    /// Feature list of the plan at checkout time.
    pub features: Vec<FeatureKey>,
    /// Current lifecycle status.
    pub status: SubscriptionStatus,
    /// End of the paid period, if bounded.
    pub current_period_end: Option<DateTime<Utc>>,
}

impl SubscriptionSnapshot {
    /// Builds an active snapshot from a plan definition.
    #[must_use]
    pub fn active(plan: &SubscriptionPlan, current_period_end: Option<DateTime<Utc>>) -> Self {
        Self {
            plan_id: plan.id.clone(),
            features: plan.features.clone(),
            status: SubscriptionStatus::Active,
            current_period_end,
        }
    }

    /// Returns whether the subscription currently contributes features.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Returns whether an active subscription has outlived its paid period.
    #[must_use]
    pub fn is_lapsed_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active()
            && self
                .current_period_end
                .is_some_and(|period_end| period_end <= now)
    }
}

/// Normalized subscription lifecycle event.
///
/// Transport form: `{"event_type": "activated", "plan_id": "gold",
/// "current_period_end": "<RFC 3339>"}`, `{"event_type": "cancelled"}` or
/// `{"event_type": "expired"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SubscriptionEvent {
    /// Checkout completed or the plan changed.
    Activated {
        /// Plan now active.
        plan_id: PlanId,
        /// End of the paid period.
        #[serde(default)]
        current_period_end: Option<DateTime<Utc>>,
    },
    /// Subscription was cancelled.
    Cancelled,
    /// Subscription ran out.
    Expired,
}

impl SubscriptionEvent {
    /// Returns the status this event moves the subscription to.
    #[must_use]
    pub fn target_status(&self) -> SubscriptionStatus {
        match self {
            Self::Activated { .. } => SubscriptionStatus::Active,
            Self::Cancelled => SubscriptionStatus::Cancelled,
            Self::Expired => SubscriptionStatus::Expired,
        }
    }
}
