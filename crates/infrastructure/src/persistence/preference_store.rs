//! SQLite preference store implementation
//!
//! Implements the `PreferenceStore` port. Every write is one statement that
//! touches only the columns of the field being changed, so a concurrent
//! `/set_home` and `/set_work_reminder` never overwrite each other.

use std::sync::Arc;

use application::{ApplicationError, ports::PreferenceStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{
    ChatId, ChatIdentity, ChatUserId, CommuteTarget, ReminderTime, StopId, StopRef,
    UserPreference,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument, warn};

use super::connection::ConnectionPool;

const SELECT_COLUMNS: &str = "SELECT user_id, chat_id, display_name,
        home_stop_id, home_stop_name, work_stop_id, work_stop_name,
        home_reminder, work_reminder, created_at, updated_at
     FROM user_preferences";

/// SQLite-based preference store
#[derive(Debug, Clone)]
pub struct SqlitePreferenceStore {
    pool: Arc<ConnectionPool>,
}

impl SqlitePreferenceStore {
    /// Create a new SQLite preference store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Run `f` on a pooled connection off the async runtime
    async fn with_conn<T, F>(&self, f: F) -> Result<T, ApplicationError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(e.to_string()))?;
            f(&conn).map_err(|e| ApplicationError::Internal(e.to_string()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(e.to_string()))?
    }
}

const fn upsert_stop_sql(target: CommuteTarget) -> &'static str {
    match target {
        CommuteTarget::Home => {
            "INSERT INTO user_preferences
                 (user_id, chat_id, display_name, home_stop_id, home_stop_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                 chat_id = excluded.chat_id,
                 display_name = excluded.display_name,
                 home_stop_id = excluded.home_stop_id,
                 home_stop_name = excluded.home_stop_name,
                 updated_at = excluded.updated_at"
        },
        CommuteTarget::Work => {
            "INSERT INTO user_preferences
                 (user_id, chat_id, display_name, work_stop_id, work_stop_name, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                 chat_id = excluded.chat_id,
                 display_name = excluded.display_name,
                 work_stop_id = excluded.work_stop_id,
                 work_stop_name = excluded.work_stop_name,
                 updated_at = excluded.updated_at"
        },
    }
}

const fn update_reminder_sql(target: CommuteTarget) -> &'static str {
    match target {
        CommuteTarget::Home => {
            "UPDATE user_preferences SET home_reminder = ?1, updated_at = ?2 WHERE user_id = ?3"
        },
        CommuteTarget::Work => {
            "UPDATE user_preferences SET work_reminder = ?1, updated_at = ?2 WHERE user_id = ?3"
        },
    }
}

const fn reminder_column(target: CommuteTarget) -> &'static str {
    match target {
        CommuteTarget::Home => "home_reminder",
        CommuteTarget::Work => "work_reminder",
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| {
            warn!(value = %raw, "Invalid timestamp in database, using current time");
            Utc::now()
        },
        |dt| dt.with_timezone(&Utc),
    )
}

/// A stop is only restored when both its id and name are present
fn stop_ref(id: Option<String>, name: Option<String>) -> Option<StopRef> {
    let id = StopId::new(id?).ok()?;
    Some(StopRef::new(id, name?))
}

/// Convert a database row to a `UserPreference`
fn row_to_preference(row: &Row<'_>) -> Result<UserPreference, rusqlite::Error> {
    let user_id: i64 = row.get(0)?;
    let chat_id: i64 = row.get(1)?;
    let display_name: String = row.get(2)?;
    let home = stop_ref(row.get(3)?, row.get(4)?);
    let work = stop_ref(row.get(5)?, row.get(6)?);
    let home_reminder: Option<String> = row.get(7)?;
    let work_reminder: Option<String> = row.get(8)?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    Ok(UserPreference::restore(
        ChatIdentity::new(ChatUserId::new(user_id), ChatId::new(chat_id), display_name),
        home,
        work,
        home_reminder.map(ReminderTime::from_stored),
        work_reminder.map(ReminderTime::from_stored),
        parse_timestamp(&created_at),
        parse_timestamp(&updated_at),
    ))
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn get(&self, user_id: ChatUserId) -> Result<Option<UserPreference>, ApplicationError> {
        let preference = self
            .with_conn(move |conn| {
                conn.query_row(
                    &format!("{SELECT_COLUMNS} WHERE user_id = ?1"),
                    [user_id.as_i64()],
                    row_to_preference,
                )
                .optional()
            })
            .await?;

        debug!(found = preference.is_some(), "Retrieved user preference");
        Ok(preference)
    }

    #[instrument(skip(self, identity, stop), fields(user_id = %identity.user_id, target = target.label(), stop_id = %stop.id))]
    async fn upsert_stop(
        &self,
        identity: &ChatIdentity,
        target: CommuteTarget,
        stop: &StopRef,
    ) -> Result<(), ApplicationError> {
        let identity = identity.clone();
        let stop = stop.clone();
        let now = Utc::now().to_rfc3339();

        self.with_conn(move |conn| {
            conn.execute(
                upsert_stop_sql(target),
                params![
                    identity.user_id.as_i64(),
                    identity.chat_id.as_i64(),
                    identity.display_name,
                    stop.id.as_str(),
                    stop.name,
                    now,
                ],
            )
        })
        .await?;

        debug!("Saved stop");
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id, target = target.label(), time = %time))]
    async fn update_reminder(
        &self,
        user_id: ChatUserId,
        target: CommuteTarget,
        time: &ReminderTime,
    ) -> Result<bool, ApplicationError> {
        let time = time.as_str().to_string();
        let now = Utc::now().to_rfc3339();

        let updated = self
            .with_conn(move |conn| {
                conn.execute(
                    update_reminder_sql(target),
                    params![time, now, user_id.as_i64()],
                )
            })
            .await?;

        debug!(updated = updated > 0, "Updated reminder");
        Ok(updated > 0)
    }

    #[instrument(skip(self), fields(target = target.label(), time = %time))]
    async fn find_by_reminder(
        &self,
        target: CommuteTarget,
        time: &ReminderTime,
    ) -> Result<Vec<UserPreference>, ApplicationError> {
        let time = time.as_str().to_string();

        let preferences = self
            .with_conn(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "{SELECT_COLUMNS} WHERE {} = ?1 ORDER BY user_id",
                    reminder_column(target)
                ))?;
                stmt.query_map([time], row_to_preference)?
                    .collect::<Result<Vec<_>, _>>()
            })
            .await?;

        debug!(count = preferences.len(), "Found reminder matches");
        Ok(preferences)
    }
}
