use super::*;

impl AccessPolicy {
    /// Returns the static feature list of one role.
    #[must_use]
    pub fn role_features(&self, role: Role) -> &[FeatureKey] {
        self.role_features
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns every feature the user currently has.
    ///
    /// Features come from active subscriptions and from the roles the user
    /// holds. Wildcard holders receive every known feature. A missing user
    /// context has no features.
    #[must_use]
    pub fn user_features(&self, subject: Option<&AccessSubject>) -> BTreeSet<FeatureKey> {
        let Some(subject) = subject else {
            return BTreeSet::new();
        };

        let mut features: BTreeSet<FeatureKey> = subject
            .active_subscriptions()
            .flat_map(|subscription| subscription.features.iter().cloned())
            .collect();

        for role in subject.roles() {
            features.extend(self.role_features(*role).iter().cloned());
        }

        if self.holds_wildcard(subject) {
            features.extend(self.known_features.iter().cloned());
        }

        features
    }

    /// Returns whether the user may use a feature.
    #[must_use]
    pub fn check_feature_access(&self, subject: Option<&AccessSubject>, feature_key: &str) -> bool {
        let Some(subject) = subject else {
            return false;
        };

        if self.holds_wildcard(subject) {
            return true;
        }

        let from_subscription = subject.active_subscriptions().any(|subscription| {
            subscription
                .features
                .iter()
                .any(|feature| feature.as_str() == feature_key)
        });

        from_subscription
            || subject.roles().iter().any(|role| {
                self.role_features(*role)
                    .iter()
                    .any(|feature| feature.as_str() == feature_key)
            })
    }
}
