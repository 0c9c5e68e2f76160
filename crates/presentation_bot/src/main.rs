//! Commute bot entry point

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    CommandService, ReminderService, TripFormatOptions, TripFormatter,
    ports::{ChatTransport, PreferenceStore, SelectionStore, TransitPort},
};
use infrastructure::{
    AppConfig, MokaSelectionStore, SqlitePreferenceStore, TelegramAdapter, TransitAdapter,
    create_pool, init_telemetry,
};
use presentation_bot::{spawn_reminder_ticker, spawn_update_polling};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.logging).context("Failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "🚌 Starting commute bot");

    config.validate().context("Invalid configuration")?;
    let timezone = config.reminder.timezone().context("Invalid reminder timezone")?;

    let pool = create_pool(&config.database)
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    info!(path = %config.database.path, "💾 Preference store ready");
    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(SqlitePreferenceStore::new(Arc::new(pool)));

    let transit: Arc<dyn TransitPort> = Arc::new(
        TransitAdapter::from_config(&config.transit.to_transit_config())
            .context("Failed to create SL transit client")?,
    );

    let telegram_config = config
        .telegram
        .to_client_config()
        .context("Telegram token is not configured")?;
    let transport: Arc<dyn ChatTransport> =
        Arc::new(TelegramAdapter::new(telegram_config).context("Failed to create Telegram client")?);

    let selections: Arc<dyn SelectionStore> = Arc::new(MokaSelectionStore::with_ttl(
        Duration::from_secs(config.reminder.selection_ttl_secs),
    ));

    let formatter = TripFormatter::new(TripFormatOptions {
        show_line_badges: config.transit.show_line_badges,
    });

    let commands = Arc::new(CommandService::new(
        Arc::clone(&preferences),
        Arc::clone(&transit),
        Arc::clone(&transport),
        selections,
        formatter,
    ));
    let reminders = Arc::new(ReminderService::new(
        preferences,
        transit,
        Arc::clone(&transport),
        formatter,
        timezone,
    ));

    let polling = spawn_update_polling(transport, commands);
    let ticker = spawn_reminder_ticker(reminders);

    info!("🤖 Commute bot running");

    shutdown_signal().await;

    polling.abort();
    ticker.abort();
    info!("👋 Commute bot stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            },
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
