//! User preference storage port

use async_trait::async_trait;
use domain::{ChatIdentity, ChatUserId, CommuteTarget, ReminderTime, StopRef, UserPreference};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for user preference persistence
///
/// Every write touches only the named fields in one atomic statement, so a
/// stop update can never clobber a concurrent reminder update.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Get the preferences of a user
    async fn get(&self, user_id: ChatUserId) -> Result<Option<UserPreference>, ApplicationError>;

    /// Save one target's stop, creating the record on first use
    ///
    /// Chat id and display name are refreshed from `identity`.
    async fn upsert_stop(
        &self,
        identity: &ChatIdentity,
        target: CommuteTarget,
        stop: &StopRef,
    ) -> Result<(), ApplicationError>;

    /// Save one target's reminder time
    ///
    /// Returns `true` if the record was found and updated, `false` if not found.
    async fn update_reminder(
        &self,
        user_id: ChatUserId,
        target: CommuteTarget,
        time: &ReminderTime,
    ) -> Result<bool, ApplicationError>;

    /// All users whose reminder for `target` equals `time` exactly
    async fn find_by_reminder(
        &self,
        target: CommuteTarget,
        time: &ReminderTime,
    ) -> Result<Vec<UserPreference>, ApplicationError>;
}
