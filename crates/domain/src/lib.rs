//! Access-control domain: roles, permissions, features, subscriptions and the
//! immutable policy that resolves them.

#![forbid(unsafe_code)]

pub mod catalog;

mod access_requirement;
mod access_subject;
mod audit;
mod feature;
mod permission;
mod policy;
mod role;
mod subscription;

pub use access_requirement::{AccessDecision, AccessRequirement};
pub use access_subject::AccessSubject;
pub use audit::AuditAction;
pub use feature::FeatureKey;
pub use permission::{Ownership, Permission, PermissionParts, WILDCARD_PERMISSION};
pub use policy::{AccessPolicy, AccessPolicyDefinition};
pub use role::Role;
pub use subscription::{
    PlanId, PlanTier, SubscriptionEvent, SubscriptionPlan, SubscriptionSnapshot,
    SubscriptionStatus,
};
