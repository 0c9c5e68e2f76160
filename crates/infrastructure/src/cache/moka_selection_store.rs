//! Moka-backed pending selection store
//!
//! Holds the stops offered by `/set_home` and `/set_work` until the user
//! picks one or the entry expires.

use std::time::Duration;

use application::{
    ApplicationError,
    ports::{PendingSelection, SelectionStore},
};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Default lifetime of a pending selection
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Upper bound on simultaneously pending selections
const DEFAULT_MAX_ENTRIES: u64 = 10_000;

/// Configuration for the selection store
#[derive(Debug, Clone, Copy)]
pub struct SelectionStoreConfig {
    /// Time after which an unanswered selection expires
    pub ttl: Duration,
    /// Maximum number of pending selections kept
    pub max_entries: u64,
}

impl Default for SelectionStoreConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// In-memory `SelectionStore` keyed by random correlation ids
pub struct MokaSelectionStore {
    cache: Cache<String, PendingSelection>,
    ttl: Duration,
}

impl std::fmt::Debug for MokaSelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaSelectionStore")
            .field("entries", &self.cache.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl MokaSelectionStore {
    /// Create a store with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SelectionStoreConfig::default())
    }

    /// Create a store with custom configuration
    #[must_use]
    pub fn with_config(config: SelectionStoreConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();

        Self {
            cache,
            ttl: config.ttl,
        }
    }

    /// Create a store whose entries live for `ttl`
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_config(SelectionStoreConfig {
            ttl,
            ..SelectionStoreConfig::default()
        })
    }
}

impl Default for MokaSelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SelectionStore for MokaSelectionStore {
    #[instrument(skip(self, selection), fields(user_id = %selection.user_id, target = selection.target.label(), stops = selection.stops.len()))]
    async fn put(&self, selection: PendingSelection) -> Result<String, ApplicationError> {
        // 32 hex chars keep `{id}:{index}` well inside Telegram's 64-byte callback data
        let correlation_id = Uuid::new_v4().simple().to_string();
        self.cache.insert(correlation_id.clone(), selection).await;
        debug!(%correlation_id, "Stored pending selection");
        Ok(correlation_id)
    }

    #[instrument(skip(self))]
    async fn get(&self, correlation_id: &str) -> Result<Option<PendingSelection>, ApplicationError> {
        let selection = self.cache.get(correlation_id).await;
        debug!(found = selection.is_some(), "Pending selection lookup");
        Ok(selection)
    }

    #[instrument(skip(self))]
    async fn remove(&self, correlation_id: &str) -> Result<(), ApplicationError> {
        self.cache.invalidate(correlation_id).await;
        Ok(())
    }
}
