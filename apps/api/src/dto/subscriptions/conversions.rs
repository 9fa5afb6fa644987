use dancerealmx_application::SubscriptionChange;
use dancerealmx_core::{AppResult, UserId};
use dancerealmx_domain::SubscriptionEvent;

use super::types::{SubscriptionChangeResponse, SubscriptionEventRequest};

impl SubscriptionEventRequest {
    /// Parses the target user and hands back the lifecycle event.
    pub fn try_into_event(self) -> AppResult<(UserId, SubscriptionEvent)> {
        let user_id = UserId::parse(self.user_id.as_str())?;

        Ok((user_id, self.event))
    }
}

impl From<SubscriptionChange> for SubscriptionChangeResponse {
    fn from(value: SubscriptionChange) -> Self {
        Self {
            plan_id: value.plan_id.as_str().to_owned(),
            status: value.status.as_str().to_owned(),
            granted_roles: value
                .granted_roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
            revoked_roles: value
                .revoked_roles
                .iter()
                .map(|role| role.as_str().to_owned())
                .collect(),
        }
    }
}
