use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Role, SubscriptionSnapshot};

/// Already-loaded authorization input for one user: held roles and
/// subscription snapshots. Access decisions are pure functions of this value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSubject {
    roles: BTreeSet<Role>,
    subscriptions: Vec<SubscriptionSnapshot>,
}

impl AccessSubject {
    /// Creates a subject from typed roles and subscription snapshots.
    #[must_use]
    pub fn new(
        roles: impl IntoIterator<Item = Role>,
        subscriptions: impl IntoIterator<Item = SubscriptionSnapshot>,
    ) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            subscriptions: subscriptions.into_iter().collect(),
        }
    }

    /// Creates a subject from stored role tags.
    ///
    /// Unrecognized tags never grant anything; they are dropped and returned
    /// so the caller can report them.
    #[must_use]
    pub fn from_role_tags<'a>(
        role_tags: impl IntoIterator<Item = &'a str>,
        subscriptions: impl IntoIterator<Item = SubscriptionSnapshot>,
    ) -> (Self, Vec<String>) {
        let mut roles = BTreeSet::new();
        let mut unknown = Vec::new();
        for tag in role_tags {
            match Role::from_str(tag) {
                Ok(role) => {
                    roles.insert(role);
                }
                Err(_) => unknown.push(tag.to_owned()),
            }
        }

        (
            Self {
                roles,
                subscriptions: subscriptions.into_iter().collect(),
            },
            unknown,
        )
    }

    /// Returns held roles.
    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Returns whether the subject holds a role directly.
    #[must_use]
    pub fn holds(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns only subscriptions in the `ACTIVE` state.
    pub fn active_subscriptions(&self) -> impl Iterator<Item = &SubscriptionSnapshot> {
        self.subscriptions
            .iter()
            .filter(|subscription| subscription.is_active())
    }
}
