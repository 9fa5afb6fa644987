use crate::PlanTier;

use super::*;

impl AccessPolicy {
    /// Evaluates a handler requirement against an already-loaded subject.
    ///
    /// A missing subject is always denied.
    #[must_use]
    pub fn evaluate(
        &self,
        subject: Option<&AccessSubject>,
        requirement: &AccessRequirement,
    ) -> AccessDecision {
        let Some(subject) = subject else {
            return AccessDecision::denied("no authenticated user context");
        };

        match requirement {
            AccessRequirement::AllPermissions(required) => {
                self.evaluate_all_permissions(subject, required)
            }
            AccessRequirement::AnyPermission(candidates) => {
                let granted = candidates
                    .iter()
                    .any(|permission| self.subject_has_permission(subject, permission.as_str()));
                decide(granted, || format!("requires {requirement}"))
            }
            AccessRequirement::AnyRole(roles) => {
                let granted = roles.iter().any(|role| subject.holds(*role));
                decide(granted, || format!("requires {requirement}"))
            }
            AccessRequirement::Feature(feature) => {
                let granted = self.check_feature_access(Some(subject), feature.as_str());
                decide(granted, || format!("requires {requirement}"))
            }
            AccessRequirement::ActiveSubscription => {
                let granted = subject.active_subscriptions().next().is_some();
                decide(granted, || format!("requires {requirement}"))
            }
            AccessRequirement::MinimumPlan(tier) => {
                let granted = self.highest_active_tier(subject) >= Some(*tier);
                decide(granted, || format!("requires {requirement}"))
            }
        }
    }

    /// Returns the richest tier among the subject's active subscriptions.
    /// Subscriptions on plans missing from the catalog are ignored.
    #[must_use]
    pub fn highest_active_tier(&self, subject: &AccessSubject) -> Option<PlanTier> {
        subject
            .active_subscriptions()
            .filter_map(|subscription| self.plan(&subscription.plan_id))
            .map(|plan| plan.tier)
            .max()
    }

    fn evaluate_all_permissions(
        &self,
        subject: &AccessSubject,
        required: &[Permission],
    ) -> AccessDecision {
        let granted = self.subject_permissions(subject);
        if granted.contains(WILDCARD_PERMISSION) {
            return AccessDecision::Allowed;
        }

        let missing = required
            .iter()
            .filter(|permission| !granted.contains(permission.as_str()))
            .map(Permission::as_str)
            .collect::<Vec<_>>();

        decide(missing.is_empty(), || {
            format!("missing permissions [{}]", missing.join(", "))
        })
    }
}

fn decide(granted: bool, reason: impl FnOnce() -> String) -> AccessDecision {
    if granted {
        AccessDecision::Allowed
    } else {
        AccessDecision::denied(reason())
    }
}
