//! End-to-end command and reminder flow over the real SQLite and moka stores

use std::sync::{Arc, Mutex};

use application::{
    ApplicationError, CommandService, ReminderService, TripFormatter,
    ports::{ChatTransport, IncomingUpdate, OutgoingMessage, PreferenceStore, TransitPort},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::{ChatId, ChatIdentity, ChatUserId, Leg, Stop, StopCall, StopId, Timezone, Trip};
use infrastructure::{DatabaseConfig, MokaSelectionStore, SqlitePreferenceStore, create_pool};

struct FakeTransit;

#[async_trait]
impl TransitPort for FakeTransit {
    async fn search_trips(
        &self,
        origin: &StopId,
        destination: &StopId,
    ) -> Result<Vec<Trip>, ApplicationError> {
        let name = |id: &StopId| match id.as_str() {
            "9001" => "Slussen",
            _ => "T-Centralen",
        };
        let trip = Trip::new(vec![Leg::new(
            StopCall::new(name(origin), "07:06:00"),
            StopCall::new(name(destination), "07:10:00"),
        )])
        .map_err(ApplicationError::from)?;
        Ok(vec![trip])
    }

    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, ApplicationError> {
        Ok(match query {
            "slussen" => vec![
                Stop::new(StopId::new("9192").unwrap(), "Slussen (Stockholm)"),
                Stop::new(StopId::new("9001").unwrap(), "Slussen"),
            ],
            "central" => vec![Stop::new(
                StopId::new("9000").unwrap(),
                "T-Centralen",
            )],
            _ => Vec::new(),
        })
    }
}

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<OutgoingMessage>>,
    acknowledged: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingTransport {
    fn take(&self) -> Vec<OutgoingMessage> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn next_updates(&self) -> Result<Vec<IncomingUpdate>, ApplicationError> {
        Ok(Vec::new())
    }

    async fn send(&self, message: &OutgoingMessage) -> Result<(), ApplicationError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn acknowledge_selection(
        &self,
        selection_id: &str,
        text: Option<String>,
    ) -> Result<(), ApplicationError> {
        self.acknowledged
            .lock()
            .unwrap()
            .push((selection_id.to_string(), text));
        Ok(())
    }
}

struct Harness {
    commands: CommandService,
    reminders: ReminderService,
    preferences: Arc<dyn PreferenceStore>,
    transport: Arc<RecordingTransport>,
}

fn harness() -> Harness {
    let pool = create_pool(&DatabaseConfig::in_memory()).unwrap();
    let preferences: Arc<dyn PreferenceStore> =
        Arc::new(SqlitePreferenceStore::new(Arc::new(pool)));
    let transit: Arc<dyn TransitPort> = Arc::new(FakeTransit);
    let transport = Arc::new(RecordingTransport::default());
    let formatter = TripFormatter::default();

    let commands = CommandService::new(
        Arc::clone(&preferences),
        Arc::clone(&transit),
        transport.clone(),
        Arc::new(MokaSelectionStore::new()),
        formatter,
    );
    let reminders = ReminderService::new(
        Arc::clone(&preferences),
        transit,
        transport.clone(),
        formatter,
        Timezone::stockholm(),
    );

    Harness {
        commands,
        reminders,
        preferences,
        transport,
    }
}

fn sofia() -> ChatIdentity {
    ChatIdentity::new(ChatUserId::new(77), ChatId::new(770), "Sofia")
}

fn say(text: &str) -> IncomingUpdate {
    IncomingUpdate::Message {
        from: sofia(),
        text: text.to_string(),
    }
}

fn choose(payload: &str) -> IncomingUpdate {
    IncomingUpdate::Selection {
        from: sofia(),
        selection_id: "cb-1".to_string(),
        payload: payload.to_string(),
    }
}

/// Pick the option labelled `label` from the last option list sent
async fn set_stop(h: &Harness, command: &str, label: &str) {
    h.commands.dispatch(say(command)).await;
    let offered = h.transport.take();
    let options = &offered.last().unwrap().options;
    let option = options.iter().find(|o| o.label == label).unwrap();
    h.commands.dispatch(choose(&option.payload)).await;
}

/// 07:05 in Stockholm during winter time
fn five_past_seven() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 2, 6, 5, 0).unwrap()
}

#[tokio::test]
async fn trips_require_both_locations() {
    let h = harness();
    h.commands.dispatch(say("/work")).await;

    let sent = h.transport.take();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "Please setup home and work locations");
}

#[tokio::test]
async fn lookup_offers_every_station_as_an_option() {
    let h = harness();
    h.commands.dispatch(say("/set_home slussen")).await;

    let sent = h.transport.take();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, "Choose location:");
    let labels: Vec<&str> = sent[0].options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Slussen (Stockholm)", "Slussen"]);
}

#[tokio::test]
async fn selection_saves_stop_and_confirms() {
    let h = harness();
    set_stop(&h, "/set_home slussen", "Slussen").await;

    let sent = h.transport.take();
    assert_eq!(sent.last().unwrap().text, "Home location set to Slussen");
    let acks = h.transport.acknowledged.lock().unwrap().clone();
    assert_eq!(acks, vec![("cb-1".to_string(), Some("Home location set to Slussen".to_string()))]);

    let saved = h.preferences.get(ChatUserId::new(77)).await.unwrap().unwrap();
    let home = saved.stop(domain::CommuteTarget::Home).unwrap();
    assert_eq!(home.id.as_str(), "9001");
    assert_eq!(saved.display_name(), "Sofia");
}

#[tokio::test]
async fn used_selection_cannot_be_replayed() {
    let h = harness();
    h.commands.dispatch(say("/set_work central")).await;
    let payload = h.transport.take()[0].options[0].payload.clone();

    h.commands.dispatch(choose(&payload)).await;
    h.commands.dispatch(choose(&payload)).await;

    let sent = h.transport.take();
    assert_eq!(sent.last().unwrap().text, "This selection has expired, please search again");
}

#[tokio::test]
async fn reminder_requires_location_first() {
    let h = harness();
    h.commands.dispatch(say("/set_work_reminder 7:05am")).await;

    let sent = h.transport.take();
    assert_eq!(
        sent[0].text,
        "You need to set up work location first using /set_work command"
    );
}

#[tokio::test]
async fn full_commute_setup_then_reminder_fires() {
    let h = harness();
    set_stop(&h, "/set_home slussen", "Slussen").await;
    set_stop(&h, "/set_work central", "T-Centralen").await;
    h.transport.take();

    h.commands.dispatch(say("/set_work_reminder 7:05am")).await;
    assert_eq!(h.transport.take()[0].text, "Work reminder set to 7:05AM");

    h.commands.dispatch(say("/work")).await;
    let trips = h.transport.take();
    assert_eq!(trips.len(), 1);
    assert!(trips[0].markdown);
    assert!(trips[0].text.starts_with("*Trip:* Slussen"));

    let report = h.reminders.run_tick(five_past_seven()).await;
    assert_eq!(report.tick.as_str(), "7:05AM");
    assert_eq!(report.work_matches, 1);
    assert_eq!(report.home_matches, 0);
    assert_eq!(report.messages_sent, 1);

    let delivered = h.transport.take();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].chat_id, ChatId::new(770));
    assert!(delivered[0].text.contains("T-Centralen"));
}

#[tokio::test]
async fn tick_at_other_minute_sends_nothing() {
    let h = harness();
    set_stop(&h, "/set_home slussen", "Slussen").await;
    set_stop(&h, "/set_work central", "T-Centralen").await;
    h.commands.dispatch(say("/set_work_reminder 7:05am")).await;
    h.transport.take();

    let report = h
        .reminders
        .run_tick(five_past_seven() + chrono::TimeDelta::minutes(1))
        .await;
    assert_eq!(report.work_matches, 0);
    assert!(h.transport.take().is_empty());
}
