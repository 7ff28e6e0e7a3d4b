//! The canonical calendar event model.
//!
//! `CalendarEvent` is what the views and the host UI work with.
//! Raw scheduling-service payloads are converted into it by the
//! `normalize` module; nothing downstream ever touches the wire shape.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A normalized interview event, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Opaque stable identifier from the scheduling service.
    pub id: String,
    pub title: String,
    /// Candidate name.
    pub attendee: String,
    /// Pipeline-stage slug, the key into the stage style resolver.
    #[serde(rename = "type")]
    pub stage_slug: String,
    /// Human label override for the round, when the service supplied one.
    pub round_name: Option<String>,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub end_time: NaiveTime,
    /// True iff the source status was settled (confirmed/completed).
    pub confirmed: bool,
}

impl CalendarEvent {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// `HH:MM` display form of the start time.
    pub fn start_label(&self) -> String {
        self.start_time.format(TIME_FORMAT).to_string()
    }

    /// `HH:MM` display form of the end time.
    pub fn end_label(&self) -> String {
        self.end_time.format(TIME_FORMAT).to_string()
    }
}

pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// Serde adapter for `HH:MM` wall-clock strings.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CalendarEvent {
        CalendarEvent {
            id: "evt-1".to_string(),
            title: "Technical interview".to_string(),
            attendee: "Priya Sharma".to_string(),
            stage_slug: "technical-round".to_string(),
            round_name: Some("Technical Round".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            confirmed: true,
        }
    }

    #[test]
    fn serializes_date_and_times_as_wall_clock_strings() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["start_time"], "11:30");
        assert_eq!(json["end_time"], "12:30");
        assert_eq!(json["type"], "technical-round");
    }

    #[test]
    fn round_trips_through_json() {
        let event = sample();
        let json = serde_json::to_string(&event).unwrap();
        let back: CalendarEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn duration_is_in_minutes() {
        assert_eq!(sample().duration_minutes(), 60);
    }
}
