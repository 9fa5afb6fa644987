//! Periodic expiry of subscriptions whose paid period has ended.

use std::time::Duration;

use chrono::Utc;
use dancerealmx_application::SubscriptionService;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Starts the background sweeper on the current runtime.
pub fn spawn(subscription_service: SubscriptionService, interval: Duration) -> JoinHandle<()> {
    info!(
        interval_seconds = interval.as_secs(),
        "subscription sweeper started"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            sweep_once(&subscription_service).await;
        }
    })
}

async fn sweep_once(subscription_service: &SubscriptionService) {
    match subscription_service.expire_lapsed(Utc::now()).await {
        Ok(expired) if expired.is_empty() => {}
        Ok(expired) => {
            info!(expired_count = expired.len(), "expired lapsed subscriptions");
        }
        Err(error) => {
            warn!(error = %error, "failed to expire lapsed subscriptions");
        }
    }
}
