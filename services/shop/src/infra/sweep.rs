//! Periodic removal of expired pending registrations.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::domain::repository::PendingRegistrationRepository;

/// Sweep forever on a fixed interval. The first sweep runs immediately.
pub async fn run_pending_sweep<P: PendingRegistrationRepository>(repo: P, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        sweep_once(&repo).await;
    }
}

/// Delete everything expired as of now. Errors are logged and reported as zero.
pub async fn sweep_once<P: PendingRegistrationRepository>(repo: &P) -> u64 {
    match repo.delete_expired(Utc::now()).await {
        Ok(removed) => {
            if removed > 0 {
                tracing::info!(removed, "expired pending registrations removed");
            }
            removed
        }
        Err(e) => {
            tracing::warn!(error = %e, "pending registration sweep failed");
            0
        }
    }
}
