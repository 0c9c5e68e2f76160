//! Command service
//!
//! Handles every inbound chat update: slash commands, plain text and stop
//! selections. Replies go out through the [`ChatTransport`] port.

use std::{fmt, sync::Arc};

use domain::{BotCommand, ChatIdentity, CommuteTarget, ReminderTime, StopRef};
use tracing::{debug, error, info, instrument, warn};

use super::trip_formatter::TripFormatter;
use crate::{
    error::ApplicationError,
    ports::{
        ChatTransport, IncomingUpdate, OutgoingMessage, PendingSelection, PreferenceStore,
        ReplyOption, SelectionPayload, SelectionStore, TransitPort,
    },
};

/// User-facing texts
pub mod messages {
    pub const GREETING: &str = "Hi this is a StockholmCommuteBot";
    pub const SETUP_LOCATIONS: &str = "Please setup home and work locations";
    pub const NO_STATIONS: &str = "No stations found";
    pub const CHOOSE_LOCATION: &str = "Choose location:";
    pub const NO_TRIPS: &str = "No trips found";
    pub const TIME_FORMAT_HINT: &str = "Time should be send in a format: 7:54am";
    pub const PLANNER_UNAVAILABLE: &str =
        "The journey planner is unavailable right now, please try again later";
    pub const SELECTION_EXPIRED: &str = "This selection has expired, please search again";
    pub const SOMETHING_WENT_WRONG: &str = "Something went wrong, please try again later";
    pub const USAGE: &str = "Available commands:\n\
        /set_home <station> - choose your home stop\n\
        /set_work <station> - choose your work stop\n\
        /home - trips from work to home\n\
        /work - trips from home to work\n\
        /set_home_reminder <time> - get trips home every day, e.g. 5:30pm\n\
        /set_work_reminder <time> - get trips to work every day, e.g. 7:54am";
}

/// Handles chat commands and selections
#[derive(Clone)]
pub struct CommandService {
    preferences: Arc<dyn PreferenceStore>,
    transit: Arc<dyn TransitPort>,
    transport: Arc<dyn ChatTransport>,
    selections: Arc<dyn SelectionStore>,
    formatter: TripFormatter,
}

impl fmt::Debug for CommandService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandService")
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl CommandService {
    #[must_use]
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        transit: Arc<dyn TransitPort>,
        transport: Arc<dyn ChatTransport>,
        selections: Arc<dyn SelectionStore>,
        formatter: TripFormatter,
    ) -> Self {
        Self {
            preferences,
            transit,
            transport,
            selections,
            formatter,
        }
    }

    /// Handle one update, replying with a generic notice on failure
    ///
    /// Errors are logged here and never propagate, so one bad update cannot
    /// take the polling loop down.
    #[instrument(skip(self, update), fields(user_id = %update.from().user_id))]
    pub async fn dispatch(&self, update: IncomingUpdate) {
        let chat_id = update.from().chat_id;
        if let Err(e) = self.handle(update).await {
            error!(error = %e, "Failed to handle update");
            let notice = OutgoingMessage::text(chat_id, messages::SOMETHING_WENT_WRONG);
            if let Err(e) = self.transport.send(&notice).await {
                warn!(error = %e, "Failed to send error notice");
            }
        }
    }

    /// Handle one update
    pub async fn handle(&self, update: IncomingUpdate) -> Result<(), ApplicationError> {
        match update {
            IncomingUpdate::Message { from, text } => {
                let command = BotCommand::parse(&text);
                debug!(command = command.name(), "Parsed command");
                self.handle_command(&from, command).await
            },
            IncomingUpdate::Selection {
                from,
                selection_id,
                payload,
            } => self.handle_selection(&from, &selection_id, &payload).await,
        }
    }

    /// Execute a parsed command for a user
    pub async fn handle_command(
        &self,
        from: &ChatIdentity,
        command: BotCommand,
    ) -> Result<(), ApplicationError> {
        match command {
            BotCommand::Start => {
                self.reply(from, format!("{}\n\n{}", messages::GREETING, messages::USAGE))
                    .await
            },
            BotCommand::Help | BotCommand::Unknown { .. } => {
                self.reply(from, messages::USAGE).await
            },
            BotCommand::Trips { target } => self.send_trips(from, target).await,
            BotCommand::SetStop { target, query } => self.offer_stops(from, target, &query).await,
            BotCommand::SetReminder { target, input } => {
                self.set_reminder(from, target, &input).await
            },
        }
    }

    /// `/home` and `/work`
    #[instrument(skip(self, from), fields(user_id = %from.user_id, %target))]
    async fn send_trips(
        &self,
        from: &ChatIdentity,
        target: CommuteTarget,
    ) -> Result<(), ApplicationError> {
        let Some(preference) = self.preferences.get(from.user_id).await? else {
            return self.reply(from, messages::SETUP_LOCATIONS).await;
        };
        let Some((origin, destination)) = preference.route_to(target) else {
            return self.reply(from, messages::SETUP_LOCATIONS).await;
        };

        let trips = match self.transit.search_trips(&origin.id, &destination.id).await {
            Ok(trips) => trips,
            Err(e) => {
                warn!(error = %e, "Trip search failed");
                return self.reply(from, messages::PLANNER_UNAVAILABLE).await;
            },
        };

        if trips.is_empty() {
            return self.reply(from, messages::NO_TRIPS).await;
        }

        debug!(count = trips.len(), "Sending trips");
        for trip in &trips {
            let message = OutgoingMessage::markdown(from.chat_id, self.formatter.format(trip));
            self.transport.send(&message).await?;
        }
        Ok(())
    }

    /// `/set_home <query>` and `/set_work <query>`
    #[instrument(skip(self, from), fields(user_id = %from.user_id, %target))]
    async fn offer_stops(
        &self,
        from: &ChatIdentity,
        target: CommuteTarget,
        query: &str,
    ) -> Result<(), ApplicationError> {
        if query.trim().is_empty() {
            let hint = format!("Usage: {} <station name>", target.set_command());
            return self.reply(from, hint).await;
        }

        let stops = match self.transit.lookup_stops(query).await {
            Ok(stops) => stops,
            Err(e) => {
                warn!(error = %e, "Stop lookup failed");
                return self.reply(from, messages::PLANNER_UNAVAILABLE).await;
            },
        };

        if stops.is_empty() {
            return self.reply(from, messages::NO_STATIONS).await;
        }

        let stops: Vec<StopRef> = stops.iter().map(domain::Stop::to_ref).collect();
        let labels: Vec<String> = stops.iter().map(|s| s.name.clone()).collect();
        let correlation_id = self
            .selections
            .put(PendingSelection {
                user_id: from.user_id,
                target,
                stops,
            })
            .await?;

        let options = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| {
                ReplyOption::new(label, SelectionPayload::new(&correlation_id, index).to_string())
            })
            .collect();

        let message =
            OutgoingMessage::text(from.chat_id, messages::CHOOSE_LOCATION).with_options(options);
        self.transport.send(&message).await
    }

    /// A stop option was chosen
    #[instrument(skip(self, from, selection_id), fields(user_id = %from.user_id))]
    async fn handle_selection(
        &self,
        from: &ChatIdentity,
        selection_id: &str,
        payload: &str,
    ) -> Result<(), ApplicationError> {
        let chosen = match SelectionPayload::parse(payload) {
            Some(parsed) => self.resolve_selection(from, &parsed).await?,
            None => None,
        };

        let Some((correlation_id, target, stop)) = chosen else {
            debug!(payload, "Selection expired or unknown");
            self.acknowledge(selection_id, None).await;
            return self.reply(from, messages::SELECTION_EXPIRED).await;
        };

        self.preferences.upsert_stop(from, target, &stop).await?;
        self.selections.remove(&correlation_id).await?;
        info!(%target, stop_id = %stop.id, "Stop saved");

        let confirmation = format!("{} location set to {}", capitalize(target.label()), stop.name);
        self.acknowledge(selection_id, Some(confirmation.clone())).await;
        self.reply(from, confirmation).await
    }

    /// Find the stop behind a payload, if it is still valid for this user
    async fn resolve_selection(
        &self,
        from: &ChatIdentity,
        payload: &SelectionPayload,
    ) -> Result<Option<(String, CommuteTarget, StopRef)>, ApplicationError> {
        let Some(pending) = self.selections.get(&payload.correlation_id).await? else {
            return Ok(None);
        };
        if pending.user_id != from.user_id {
            warn!(owner = %pending.user_id, "Selection used by another user");
            return Ok(None);
        }
        Ok(pending
            .stops
            .get(payload.index)
            .cloned()
            .map(|stop| (payload.correlation_id.clone(), pending.target, stop)))
    }

    /// `/set_home_reminder <time>` and `/set_work_reminder <time>`
    #[instrument(skip(self, from), fields(user_id = %from.user_id, %target))]
    async fn set_reminder(
        &self,
        from: &ChatIdentity,
        target: CommuteTarget,
        input: &str,
    ) -> Result<(), ApplicationError> {
        let Ok(time) = ReminderTime::parse(input) else {
            return self.reply(from, messages::TIME_FORMAT_HINT).await;
        };

        if !self.preferences.update_reminder(from.user_id, target, &time).await? {
            let guidance = format!(
                "You need to set up {} location first using {} command",
                target.label(),
                target.set_command()
            );
            return self.reply(from, guidance).await;
        }

        info!(%time, "Reminder saved");
        let confirmation = format!(
            "{} reminder set to {}",
            capitalize(target.label()),
            time
        );
        self.reply(from, confirmation).await
    }

    async fn reply(&self, to: &ChatIdentity, text: impl Into<String>) -> Result<(), ApplicationError> {
        self.transport.send(&OutgoingMessage::text(to.chat_id, text)).await
    }

    async fn acknowledge(&self, selection_id: &str, text: Option<String>) {
        if let Err(e) = self.transport.acknowledge_selection(selection_id, text).await {
            debug!(error = %e, "Failed to acknowledge selection");
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
