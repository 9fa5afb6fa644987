use std::sync::Arc;

use dancerealmx_core::{AppError, AppResult, UserIdentity};
use dancerealmx_domain::{AccessDecision, AccessPolicy, AccessRequirement, AccessSubject};
use tracing::{debug, warn};

use crate::AccessSubjectRepository;

mod effective;

pub use effective::EffectiveAccess;

/// Application service answering allow/deny questions for request handlers.
///
/// Loads the user's roles and subscriptions through the repository port and
/// delegates every decision to the immutable [`AccessPolicy`].
#[derive(Clone)]
pub struct AccessService {
    policy: Arc<AccessPolicy>,
    repository: Arc<dyn AccessSubjectRepository>,
}

impl AccessService {
    /// Creates a new access service.
    #[must_use]
    pub fn new(policy: Arc<AccessPolicy>, repository: Arc<dyn AccessSubjectRepository>) -> Self {
        Self { policy, repository }
    }

    /// Returns the policy decisions are evaluated against.
    #[must_use]
    pub fn policy(&self) -> &AccessPolicy {
        self.policy.as_ref()
    }

    /// Loads the authorization input for a user.
    ///
    /// Unknown users yield `None`, which every check treats as "no access".
    pub async fn load_subject(&self, user: &UserIdentity) -> AppResult<Option<AccessSubject>> {
        Ok(self
            .load_subject_with_ignored_tags(user)
            .await?
            .map(|(subject, _)| subject))
    }

    /// Ensures the user satisfies a requirement.
    pub async fn require(
        &self,
        user: &UserIdentity,
        requirement: &AccessRequirement,
    ) -> AppResult<()> {
        match self.decide(user, requirement).await? {
            AccessDecision::Allowed => Ok(()),
            AccessDecision::Denied { reason } => {
                warn!(
                    user_id = %user.user_id(),
                    requirement = %requirement,
                    reason = reason.as_str(),
                    "access denied"
                );
                Err(AppError::Forbidden(format!(
                    "user '{}' is not allowed: {reason}",
                    user.user_id()
                )))
            }
        }
    }

    /// Returns whether the user satisfies a requirement.
    pub async fn is_allowed(
        &self,
        user: &UserIdentity,
        requirement: &AccessRequirement,
    ) -> AppResult<bool> {
        Ok(self.decide(user, requirement).await?.is_allowed())
    }

    /// Returns whether the feature gate grants a feature to the user.
    pub async fn check_feature_access(
        &self,
        user: &UserIdentity,
        feature_key: &str,
    ) -> AppResult<bool> {
        let subject = self.load_subject(user).await?;
        Ok(self.policy.check_feature_access(subject.as_ref(), feature_key))
    }

    async fn decide(
        &self,
        user: &UserIdentity,
        requirement: &AccessRequirement,
    ) -> AppResult<AccessDecision> {
        let subject = self.load_subject(user).await?;
        let decision = self.policy.evaluate(subject.as_ref(), requirement);
        debug!(
            user_id = %user.user_id(),
            requirement = %requirement,
            allowed = decision.is_allowed(),
            "evaluated access requirement"
        );

        Ok(decision)
    }

    async fn load_subject_with_ignored_tags(
        &self,
        user: &UserIdentity,
    ) -> AppResult<Option<(AccessSubject, Vec<String>)>> {
        let Some(record) = self.repository.find_access_record(user.user_id()).await? else {
            return Ok(None);
        };

        let (subject, ignored) = AccessSubject::from_role_tags(
            record.role_tags.iter().map(String::as_str),
            record.subscriptions,
        );
        if !ignored.is_empty() {
            warn!(
                user_id = %user.user_id(),
                ignored_role_tags = ?ignored,
                "ignoring unknown role tags"
            );
        }

        Ok(Some((subject, ignored)))
    }
}
