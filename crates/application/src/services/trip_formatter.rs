//! Trip message formatting
//!
//! Pure functions turning a planner trip into the one-line Markdown summary
//! sent to users:
//!
//! `*Trip:* A (*08:00*) *=>* B (*08:20* | *20m0s*)\n *Duration:* 20m0s`

use chrono::TimeDelta;
use domain::entities::{Leg, StopCall, Trip};

const SEGMENT_SEPARATOR: &str = " *=>* ";
const UNKNOWN_TIME: &str = "--:--";

/// Formatting switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TripFormatOptions {
    /// Prefix segments with `*{mode}{line}* ` (e.g. `*T14* `)
    pub show_line_badges: bool,
}

/// Formats trips into chat messages
#[derive(Debug, Clone, Copy, Default)]
pub struct TripFormatter {
    options: TripFormatOptions,
}

impl TripFormatter {
    #[must_use]
    pub const fn new(options: TripFormatOptions) -> Self {
        Self { options }
    }

    /// Format one trip
    ///
    /// Produces one leading segment for the departure plus one segment per
    /// leg. Only the first alert of a leg is shown and its text is embedded
    /// verbatim.
    #[must_use]
    pub fn format(&self, trip: &Trip) -> String {
        let legs = trip.legs();
        let mut segments = Vec::with_capacity(legs.len() + 1);

        let departure = trip.departure();
        segments.push(format!(
            "{}{} (*{}*)",
            self.badge(&legs[0]),
            departure.name,
            clock_label(departure),
        ));

        for leg in legs {
            let alert = leg
                .first_alert()
                .map(|alert| format!(" *{}:* {}", alert.headline, alert.body))
                .unwrap_or_default();

            segments.push(format!(
                "{}{} (*{}* | *{}*){}",
                self.badge(leg),
                leg.destination.name,
                clock_label(&leg.destination),
                format_duration(elapsed(&leg.origin, &leg.destination)),
                alert,
            ));
        }

        let total = elapsed(trip.departure(), trip.arrival());
        format!(
            "*Trip:* {}\n *Duration:* {}",
            segments.join(SEGMENT_SEPARATOR),
            format_duration(total)
        )
    }

    fn badge(&self, leg: &Leg) -> String {
        if !self.options.show_line_badges {
            return String::new();
        }
        let mode = leg
            .category_code
            .as_deref()
            .map_or("", mode_letter);
        let line = leg.line.as_deref().unwrap_or_default();
        if mode.is_empty() && line.is_empty() {
            return String::new();
        }
        format!("*{mode}{line}* ")
    }
}

/// Letter used for a transport category code
#[must_use]
pub fn mode_letter(category_code: &str) -> &'static str {
    match category_code {
        "BUS" => "B",
        "MET" => "T",
        "TRM" => "L",
        "TRN" => "J",
        "SHP" => "S",
        _ => "",
    }
}

fn clock_label(call: &StopCall) -> String {
    call.clock_time()
        .map_or_else(|| UNKNOWN_TIME.to_string(), |t| t.format("%H:%M").to_string())
}

/// Time between two stop calls
///
/// Uses full date-times when both calls carry a date, otherwise plain
/// time-of-day (a midnight crossing then comes out negative). Zero when
/// either time is unparsable.
fn elapsed(from: &StopCall, to: &StopCall) -> TimeDelta {
    if let (Some(start), Some(end)) = (from.date_time(), to.date_time()) {
        return end - start;
    }
    match (from.clock_time(), to.clock_time()) {
        (Some(start), Some(end)) => end - start,
        _ => TimeDelta::zero(),
    }
}

/// Render a duration the way Go's `time.Duration` prints whole seconds
///
/// `0s`, `45s`, `20m0s`, `1h5m0s`, `-5m0s`.
#[must_use]
pub fn format_duration(duration: TimeDelta) -> String {
    let seconds = duration.num_seconds();
    if seconds == 0 {
        return "0s".to_string();
    }

    let sign = if seconds < 0 { "-" } else { "" };
    let total = seconds.unsigned_abs();
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{secs}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{secs}s")
    } else {
        format!("{sign}{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use domain::entities::ServiceAlert;

    use super::*;

    fn call(name: &str, time: &str) -> StopCall {
        StopCall::new(name, time)
    }

    fn leg(from: &str, dep: &str, to: &str, arr: &str) -> Leg {
        Leg::new(call(from, dep), call(to, arr))
    }

    fn plain() -> TripFormatter {
        TripFormatter::default()
    }

    #[test]
    fn single_leg_example() {
        let trip = Trip::new(vec![leg("A", "08:00:00", "B", "08:20:00")]).unwrap();
        assert_eq!(
            plain().format(&trip),
            "*Trip:* A (*08:00*) *=>* B (*08:20* | *20m0s*)\n *Duration:* 20m0s"
        );
    }

    #[test]
    fn segment_count_is_legs_plus_one() {
        let trip = Trip::new(vec![
            leg("A", "08:00:00", "B", "08:10:00"),
            leg("B", "08:12:00", "C", "08:30:00"),
            leg("C", "08:35:00", "D", "09:05:00"),
        ])
        .unwrap();
        let message = plain().format(&trip);
        assert_eq!(message.matches(SEGMENT_SEPARATOR).count(), 3);
        assert!(message.ends_with("\n *Duration:* 1h5m0s"));
        assert!(message.contains("D (*09:05* | *30m0s*)"));
    }

    #[test]
    fn only_first_alert_is_shown() {
        let trip = Trip::new(vec![
            leg("A", "08:00:00", "B", "08:20:00")
                .with_alert(ServiceAlert::new("Delay", "Signal failure"))
                .with_alert(ServiceAlert::new("Works", "Track maintenance")),
        ])
        .unwrap();
        let message = plain().format(&trip);
        assert!(message.contains("B (*08:20* | *20m0s*) *Delay:* Signal failure"));
        assert!(!message.contains("Works"));
    }

    #[test]
    fn alert_text_is_not_escaped() {
        let trip = Trip::new(vec![
            leg("A", "08:00:00", "B", "08:20:00")
                .with_alert(ServiceAlert::new("Info_1", "use *exit* [2]")),
        ])
        .unwrap();
        assert!(plain().format(&trip).contains(" *Info_1:* use *exit* [2]"));
    }

    #[test]
    fn unparsable_time_renders_placeholder() {
        let trip = Trip::new(vec![leg("A", "08:00:00", "B", "later")]).unwrap();
        assert_eq!(
            plain().format(&trip),
            "*Trip:* A (*08:00*) *=>* B (*--:--* | *0s*)\n *Duration:* 0s"
        );
    }

    #[test]
    fn midnight_crossing_with_dates() {
        let trip = Trip::new(vec![Leg::new(
            call("A", "23:50:00").on("2026-03-02"),
            call("B", "00:10:00").on("2026-03-03"),
        )])
        .unwrap();
        assert!(plain().format(&trip).ends_with("*Duration:* 20m0s"));
    }

    #[test]
    fn midnight_crossing_without_dates_is_negative() {
        let trip = Trip::new(vec![leg("A", "23:50:00", "B", "00:10:00")]).unwrap();
        assert!(plain().format(&trip).ends_with("*Duration:* -23h40m0s"));
    }

    #[test]
    fn line_badges_when_enabled() {
        let formatter = TripFormatter::new(TripFormatOptions {
            show_line_badges: true,
        });
        let trip = Trip::new(vec![
            leg("A", "08:00:00", "B", "08:10:00").with_line("14", "MET"),
            leg("B", "08:12:00", "C", "08:30:00").with_line("4", "BUS"),
        ])
        .unwrap();
        let message = formatter.format(&trip);
        assert!(message.starts_with("*Trip:* *T14* A (*08:00*)"));
        assert!(message.contains(" *=>* *T14* B (*08:10*"));
        assert!(message.contains(" *=>* *B4* C (*08:30*"));
    }

    #[test]
    fn badge_skipped_without_product() {
        let formatter = TripFormatter::new(TripFormatOptions {
            show_line_badges: true,
        });
        let trip = Trip::new(vec![leg("A", "08:00:00", "B", "08:05:00")]).unwrap();
        assert!(formatter.format(&trip).starts_with("*Trip:* A (*08:00*)"));
    }

    #[test]
    fn go_style_durations() {
        assert_eq!(format_duration(TimeDelta::zero()), "0s");
        assert_eq!(format_duration(TimeDelta::seconds(45)), "45s");
        assert_eq!(format_duration(TimeDelta::minutes(20)), "20m0s");
        assert_eq!(format_duration(TimeDelta::minutes(65)), "1h5m0s");
        assert_eq!(format_duration(TimeDelta::hours(2)), "2h0m0s");
        assert_eq!(format_duration(TimeDelta::minutes(-5)), "-5m0s");
    }

    #[test]
    fn unknown_category_has_no_letter() {
        assert_eq!(mode_letter("MET"), "T");
        assert_eq!(mode_letter("FOO"), "");
    }
}
