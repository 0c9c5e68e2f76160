//! Reminder service
//!
//! One scheduler tick: render the tick instant as a reminder time in the
//! reference timezone, find every user whose home or work reminder equals it
//! and deliver the current trips to their chat.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use domain::{CommuteTarget, ReminderTime, Timezone, UserPreference};
use tracing::{debug, info, instrument, warn};

use super::trip_formatter::TripFormatter;
use crate::ports::{ChatTransport, OutgoingMessage, PreferenceStore, TransitPort};

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    /// Tick rendered as a reminder time
    pub tick: ReminderTime,
    pub home_matches: usize,
    pub work_matches: usize,
    pub messages_sent: usize,
    /// Store, planner and delivery failures combined
    pub failures: usize,
}

impl TickReport {
    fn empty(tick: ReminderTime) -> Self {
        Self {
            tick,
            home_matches: 0,
            work_matches: 0,
            messages_sent: 0,
            failures: 0,
        }
    }

    const fn record_matches(&mut self, target: CommuteTarget, count: usize) {
        match target {
            CommuteTarget::Home => self.home_matches = count,
            CommuteTarget::Work => self.work_matches = count,
        }
    }
}

/// Delivers scheduled trip reminders
#[derive(Clone)]
pub struct ReminderService {
    preferences: Arc<dyn PreferenceStore>,
    transit: Arc<dyn TransitPort>,
    transport: Arc<dyn ChatTransport>,
    formatter: TripFormatter,
    timezone: Timezone,
}

impl fmt::Debug for ReminderService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReminderService")
            .field("timezone", &self.timezone)
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl ReminderService {
    #[must_use]
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        transit: Arc<dyn TransitPort>,
        transport: Arc<dyn ChatTransport>,
        formatter: TripFormatter,
        timezone: Timezone,
    ) -> Self {
        Self {
            preferences,
            transit,
            transport,
            formatter,
            timezone,
        }
    }

    /// The reference timezone ticks are rendered in
    #[must_use]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    /// Process one tick
    ///
    /// Never fails: every error is logged, counted in the report and the
    /// remaining users are still served.
    #[instrument(skip(self), fields(timezone = %self.timezone))]
    pub async fn run_tick(&self, now: DateTime<Utc>) -> TickReport {
        let tick = ReminderTime::at(&self.timezone.localize(now));
        let mut report = TickReport::empty(tick.clone());

        for target in CommuteTarget::ALL {
            let users = match self.preferences.find_by_reminder(target, &tick).await {
                Ok(users) => users,
                Err(e) => {
                    warn!(error = %e, %target, %tick, "Failed to query reminder matches");
                    report.failures += 1;
                    continue;
                },
            };
            report.record_matches(target, users.len());

            for user in &users {
                self.deliver(user, target, &mut report).await;
            }
        }

        if report.home_matches + report.work_matches > 0 {
            info!(
                tick = %report.tick,
                home = report.home_matches,
                work = report.work_matches,
                sent = report.messages_sent,
                failures = report.failures,
                "Reminder tick processed"
            );
        } else {
            debug!(%tick, "No reminders due");
        }

        report
    }

    async fn deliver(&self, user: &UserPreference, target: CommuteTarget, report: &mut TickReport) {
        let Some((origin, destination)) = user.route_to(target) else {
            debug!(user_id = %user.user_id(), %target, "Reminder set but route incomplete, skipping");
            return;
        };

        let trips = match self.transit.search_trips(&origin.id, &destination.id).await {
            Ok(trips) => trips,
            Err(e) => {
                warn!(
                    error = %e,
                    user_id = %user.user_id(),
                    origin = %origin.id,
                    destination = %destination.id,
                    "Trip search failed, no reminder sent"
                );
                report.failures += 1;
                return;
            },
        };

        for trip in &trips {
            let message = OutgoingMessage::markdown(user.chat_id(), self.formatter.format(trip));
            match self.transport.send(&message).await {
                Ok(()) => report.messages_sent += 1,
                Err(e) => {
                    warn!(error = %e, chat_id = %user.chat_id(), "Failed to deliver reminder");
                    report.failures += 1;
                },
            }
        }
    }
}
