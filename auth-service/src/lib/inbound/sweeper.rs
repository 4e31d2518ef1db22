use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::auth::ports::AuthServicePort;

/// Spawn the background task that periodically purges expired sessions and
/// password resets.
///
/// # Arguments
/// * `auth_service` - Service whose `purge_expired` is driven
/// * `period` - Time between sweeps; must be non-zero
pub fn spawn_expiry_sweeper(
    auth_service: Arc<dyn AuthServicePort>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            match auth_service.purge_expired().await {
                Ok(report) => tracing::debug!(
                    sessions = report.sessions,
                    password_resets = report.password_resets,
                    "Expiry sweep finished"
                ),
                Err(e) => tracing::error!(error = %e, "Expiry sweep failed"),
            }
        }
    })
}
