use super::*;

#[async_trait]
impl SubscriptionRepository for InMemoryAccessRepository {
    async fn find_subscription(&self, user_id: UserId) -> AppResult<Option<SubscriptionSnapshot>> {
        Ok(self.subscriptions.read().await.get(&user_id).cloned())
    }

    async fn save_subscription(
        &self,
        user_id: UserId,
        subscription: SubscriptionSnapshot,
    ) -> AppResult<()> {
        debug!(
            user_id = %user_id,
            plan_id = %subscription.plan_id,
            status = subscription.status.as_str(),
            "stored subscription"
        );
        self.subscriptions.write().await.insert(user_id, subscription);

        Ok(())
    }

    async fn list_lapsed_subscriptions(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<(UserId, SubscriptionSnapshot)>> {
        let mut lapsed: Vec<(UserId, SubscriptionSnapshot)> = self
            .subscriptions
            .read()
            .await
            .iter()
            .filter(|(_, subscription)| subscription.is_lapsed_at(now))
            .map(|(user_id, subscription)| (*user_id, subscription.clone()))
            .collect();
        lapsed.sort_by_key(|(user_id, _)| *user_id);

        Ok(lapsed)
    }
}
