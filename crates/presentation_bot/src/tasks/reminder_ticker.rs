//! Reminder scheduler task
//!
//! Fires once per wall-clock minute. Each tick is processed on its own task
//! with the tick's scheduled instant, so a slow journey planner never delays
//! or merges the following ticks.

use std::sync::Arc;
use std::time::Duration;

use application::ReminderService;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

/// Reminder times have minute resolution, so exactly one tick per minute
pub const TICK_INTERVAL: Duration = Duration::from_secs(60);

/// Start of the first minute after `now`
pub fn next_boundary(now: DateTime<Utc>) -> DateTime<Utc> {
    now.duration_trunc(TimeDelta::minutes(1))
        .unwrap_or(now)
        + TimeDelta::minutes(1)
}

/// Spawn the reminder ticker
///
/// Returns a `JoinHandle` that is aborted on shutdown. Ticks already handed
/// to their own task finish independently.
pub fn spawn_reminder_ticker(service: Arc<ReminderService>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let now = Utc::now();
        let mut scheduled = next_boundary(now);
        let wait = (scheduled - now).to_std().unwrap_or_default();

        info!(
            timezone = %service.timezone(),
            first_tick = %scheduled,
            "Starting reminder ticker"
        );

        let mut ticker = tokio::time::interval_at(Instant::now() + wait, TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

        loop {
            ticker.tick().await;

            let tick_at = scheduled;
            scheduled += TimeDelta::minutes(1);

            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let report = service.run_tick(tick_at).await;
                if report.failures > 0 {
                    warn!(
                        tick = %report.tick,
                        sent = report.messages_sent,
                        failures = report.failures,
                        "Reminder tick finished with failures"
                    );
                }
            });
        }
    })
}
