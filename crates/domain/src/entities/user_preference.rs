//! User preference entity
//!
//! The saved home/work stops and reminder times of one chat user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stop::StopRef;
use crate::value_objects::{ChatId, ChatIdentity, ChatUserId, CommuteTarget, ReminderTime};

/// Saved commute preferences, keyed by chat user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreference {
    identity: ChatIdentity,
    home: Option<StopRef>,
    work: Option<StopRef>,
    home_reminder: Option<ReminderTime>,
    work_reminder: Option<ReminderTime>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserPreference {
    /// Restore a record from storage
    #[must_use]
    pub const fn restore(
        identity: ChatIdentity,
        home: Option<StopRef>,
        work: Option<StopRef>,
        home_reminder: Option<ReminderTime>,
        work_reminder: Option<ReminderTime>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            identity,
            home,
            work,
            home_reminder,
            work_reminder,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> ChatUserId {
        self.identity.user_id
    }

    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.identity.chat_id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.identity.display_name
    }

    /// Saved stop for a target
    #[must_use]
    pub const fn stop(&self, target: CommuteTarget) -> Option<&StopRef> {
        match target {
            CommuteTarget::Home => self.home.as_ref(),
            CommuteTarget::Work => self.work.as_ref(),
        }
    }

    /// Saved reminder time for a target
    #[must_use]
    pub const fn reminder(&self, target: CommuteTarget) -> Option<&ReminderTime> {
        match target {
            CommuteTarget::Home => self.home_reminder.as_ref(),
            CommuteTarget::Work => self.work_reminder.as_ref(),
        }
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Origin and destination of a trip towards `target`
    ///
    /// Going home starts at work and vice versa. `None` while either stop is
    /// still unset.
    #[must_use]
    pub fn route_to(&self, target: CommuteTarget) -> Option<(&StopRef, &StopRef)> {
        Some((self.stop(target.other())?, self.stop(target)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::StopId;

    fn identity() -> ChatIdentity {
        ChatIdentity::new(ChatUserId::new(42), ChatId::new(4200), "Anna")
    }

    fn stop(id: &str, name: &str) -> StopRef {
        StopRef::new(StopId::new(id).unwrap(), name)
    }

    fn with_stops(home: Option<StopRef>, work: Option<StopRef>) -> UserPreference {
        let now = Utc::now();
        UserPreference::restore(identity(), home, work, None, None, now, now)
    }

    #[test]
    fn empty_preference_has_no_route() {
        let pref = with_stops(None, None);
        assert_eq!(pref.user_id(), ChatUserId::new(42));
        assert_eq!(pref.chat_id(), ChatId::new(4200));
        assert_eq!(pref.display_name(), "Anna");
        assert!(pref.stop(CommuteTarget::Home).is_none());
        assert!(pref.reminder(CommuteTarget::Work).is_none());
        assert!(pref.route_to(CommuteTarget::Home).is_none());
    }

    #[test]
    fn route_home_starts_at_work() {
        let pref = with_stops(Some(stop("9001", "Home St")), Some(stop("9002", "Work St")));

        let (origin, destination) = pref.route_to(CommuteTarget::Home).unwrap();
        assert_eq!(origin.id.as_str(), "9002");
        assert_eq!(destination.id.as_str(), "9001");

        let (origin, destination) = pref.route_to(CommuteTarget::Work).unwrap();
        assert_eq!(origin.id.as_str(), "9001");
        assert_eq!(destination.id.as_str(), "9002");
    }

    #[test]
    fn route_needs_both_stops() {
        let pref = with_stops(Some(stop("9001", "Home St")), None);
        assert!(pref.route_to(CommuteTarget::Home).is_none());
        assert!(pref.route_to(CommuteTarget::Work).is_none());
    }

    #[test]
    fn restore_keeps_timestamps() {
        let created = Utc::now() - chrono::Duration::days(3);
        let pref = UserPreference::restore(
            identity(),
            Some(stop("9001", "Home St")),
            None,
            None,
            Some(ReminderTime::from_stored("7:54AM")),
            created,
            created,
        );
        assert_eq!(pref.created_at(), created);
        assert_eq!(
            pref.reminder(CommuteTarget::Work).map(ReminderTime::as_str),
            Some("7:54AM")
        );
    }
}
