use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::domain::session::ports::SessionServicePort;

/// Periodically drops revocation records whose tokens have expired.
pub struct RevocationPruner {
    session_service: Arc<dyn SessionServicePort>,
    period: Duration,
}

impl RevocationPruner {
    pub fn new(session_service: Arc<dyn SessionServicePort>, period: Duration) -> Self {
        Self {
            session_service,
            period,
        }
    }

    /// Run until the task is dropped. Failures are logged and retried on the
    /// next tick.
    pub async fn start_pruning(self) {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = self.session_service.prune_revoked().await {
                tracing::error!(error = %e, "Failed to prune revocation records");
            }
        }
    }
}
