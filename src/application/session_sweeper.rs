//! Background task removing expired sessions.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::SessionService;

/// Purges expired sessions every `period` until the runtime shuts down.
///
/// Errors are logged and the loop keeps going.
pub async fn run_session_sweeper(service: Arc<SessionService>, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Err(e) = service.purge_expired().await {
            tracing::warn!(error = %e, "Session sweep failed");
        }
    }
}
