//! Chat update polling task
//!
//! Long-polls the chat transport and dispatches every update to the command
//! service on its own task.

use std::sync::Arc;
use std::time::Duration;

use application::{ApplicationError, CommandService};
use application::ports::ChatTransport;
use tracing::{debug, info, warn};

/// Longest pause between failed polls
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Pause after `consecutive_failures` failed polls in a row
pub fn poll_backoff(consecutive_failures: u32) -> Duration {
    if consecutive_failures == 0 {
        return Duration::ZERO;
    }
    let exponent = consecutive_failures.saturating_sub(1).min(5);
    Duration::from_secs(1u64 << exponent).min(MAX_BACKOFF)
}

/// Pause after a failed poll
///
/// Errors that will not clear up by themselves (bad token, rejected request)
/// wait the full `MAX_BACKOFF` from the first failure.
pub fn pause_after(error: &ApplicationError, consecutive_failures: u32) -> Duration {
    if error.is_retryable() {
        poll_backoff(consecutive_failures)
    } else {
        MAX_BACKOFF
    }
}

/// Spawn the update polling loop
///
/// Returns a `JoinHandle` that is aborted on shutdown.
pub fn spawn_update_polling(
    transport: Arc<dyn ChatTransport>,
    commands: Arc<CommandService>,
) -> tokio::task::JoinHandle<()> {
    info!("Starting chat update polling");

    tokio::spawn(async move {
        let mut failures: u32 = 0;

        loop {
            match transport.next_updates().await {
                Ok(updates) => {
                    failures = 0;
                    if !updates.is_empty() {
                        debug!(count = updates.len(), "Dispatching updates");
                    }
                    for update in updates {
                        let commands = Arc::clone(&commands);
                        tokio::spawn(async move { commands.dispatch(update).await });
                    }
                },
                Err(e) => {
                    failures = failures.saturating_add(1);
                    let pause = pause_after(&e, failures);
                    warn!(
                        error = %e,
                        retryable = e.is_retryable(),
                        failures,
                        pause_secs = pause.as_secs(),
                        "Polling for updates failed"
                    );
                    tokio::time::sleep(pause).await;
                },
            }
        }
    })
}
