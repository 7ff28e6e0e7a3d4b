//! Normalization of raw scheduling-service payloads.
//!
//! The remote service returns interview events bucketed by day, with
//! RFC 3339 instants and a stage reference. `normalize` turns one raw
//! record into a `CalendarEvent`; `normalize_all` runs a batch and
//! skips malformed records with a warning instead of aborting the
//! whole fetch.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PipecalError, PipecalResult};
use crate::event::CalendarEvent;
use crate::stage::PipelineStage;

/// An interview event exactly as the scheduling service sends it.
///
/// Timestamps stay strings here so one unparseable record fails on its
/// own during normalization rather than poisoning the whole response
/// during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    /// Stage id, resolved against the host-supplied stage list.
    #[serde(default, alias = "stage")]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub round_name: Option<String>,
}

/// One day's worth of raw events, as returned by the fetch endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// Stage slug used when neither the stage reference nor the free-text
/// round name gives us anything.
pub const UNKNOWN_ROUND: &str = "unknown-round";

/// Statuses treated as settled.
fn is_settled(status: &str) -> bool {
    status.eq_ignore_ascii_case("CONFIRMED") || status.eq_ignore_ascii_case("COMPLETED")
}

/// Split an instant into the date and wall-clock time the calendar
/// displays.
///
/// The scheduling service embeds the interview's wall-clock time in
/// the UTC components of the instant, so no viewer-timezone conversion
/// happens. If that policy ever changes, this function is the only
/// place to touch.
pub fn display_clock(instant: DateTime<Utc>) -> (NaiveDate, NaiveTime) {
    (instant.date_naive(), instant.time())
}

fn parse_instant(value: Option<&str>, id: &str, field: &str) -> PipecalResult<DateTime<Utc>> {
    let raw = value.ok_or_else(|| PipecalError::MalformedEvent {
        id: id.to_string(),
        reason: format!("missing {field}"),
    })?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PipecalError::MalformedEvent {
            id: id.to_string(),
            reason: format!("unparseable {field} '{raw}': {e}"),
        })
}

/// Normalize one raw event against the known stage list.
///
/// Fails closed: missing or unparseable timestamps and inverted time
/// ranges are errors, never a half-built event.
pub fn normalize(raw: &RawEvent, stages: &[PipelineStage]) -> PipecalResult<CalendarEvent> {
    let start = parse_instant(raw.start_at.as_deref(), &raw.id, "start_at")?;
    let end = parse_instant(raw.end_at.as_deref(), &raw.id, "end_at")?;

    let (date, start_time) = display_clock(start);
    let (_, end_time) = display_clock(end);
    if end_time <= start_time {
        return Err(PipecalError::InvalidTimeRange {
            id: raw.id.clone(),
            start: start_time.format(crate::event::TIME_FORMAT).to_string(),
            end: end_time.format(crate::event::TIME_FORMAT).to_string(),
        });
    }

    let stage = raw
        .current_stage
        .as_deref()
        .and_then(|id| stages.iter().find(|stage| stage.id == id));
    let (stage_slug, round_name) = match stage {
        Some(stage) => (stage.slug.clone(), Some(stage.name.clone())),
        None => {
            let slug = raw
                .round_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .map(slug::slugify)
                .unwrap_or_else(|| UNKNOWN_ROUND.to_string());
            (slug, raw.round_name.clone())
        }
    };

    let attendee = raw.candidate_name.clone().unwrap_or_default();
    let title = raw
        .title
        .clone()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| "(No title)".to_string());

    Ok(CalendarEvent {
        id: raw.id.clone(),
        title,
        attendee,
        stage_slug,
        round_name,
        date,
        start_time,
        end_time,
        confirmed: raw.status.as_deref().is_some_and(is_settled),
    })
}

/// Normalize a batch, skipping malformed records with a warning.
pub fn normalize_all(raws: &[RawEvent], stages: &[PipelineStage]) -> Vec<CalendarEvent> {
    raws.iter()
        .filter_map(|raw| match normalize(raw, stages) {
            Ok(event) => Some(event),
            Err(error) => {
                tracing::warn!(event_id = %raw.id, %error, "skipping malformed event");
                None
            }
        })
        .collect()
}

/// Flatten the endpoint's day buckets into one raw event list.
pub fn flatten_buckets(buckets: Vec<DayBucket>) -> Vec<RawEvent> {
    buckets.into_iter().flat_map(|bucket| bucket.events).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawEvent {
        RawEvent {
            id: "evt-42".to_string(),
            start_at: Some("2024-03-01T11:30:00Z".to_string()),
            end_at: Some("2024-03-01T12:30:00Z".to_string()),
            status: Some("CONFIRMED".to_string()),
            title: Some("HR chat".to_string()),
            candidate_name: Some("Priya Sharma".to_string()),
            current_stage: Some("stage-7".to_string()),
            round_name: None,
        }
    }

    fn hr_stage() -> PipelineStage {
        PipelineStage {
            id: "stage-7".to_string(),
            name: "HR Round".to_string(),
            slug: "hr-round".to_string(),
            sort_order: 3,
        }
    }

    #[test]
    fn normalizes_the_reference_event() {
        let event = normalize(&raw(), &[hr_stage()]).unwrap();
        assert_eq!(event.date.to_string(), "2024-03-01");
        assert_eq!(event.start_label(), "11:30");
        assert_eq!(event.end_label(), "12:30");
        assert!(event.confirmed);
        assert_eq!(event.stage_slug, "hr-round");
        assert_eq!(event.round_name.as_deref(), Some("HR Round"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let stages = [hr_stage()];
        let first = normalize(&raw(), &stages).unwrap();
        let second = normalize(&raw(), &stages).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_stage_falls_back_to_slugified_round_name() {
        let mut event = raw();
        event.current_stage = Some("stage-999".to_string());
        event.round_name = Some("System Design Review".to_string());
        let normalized = normalize(&event, &[hr_stage()]).unwrap();
        assert_eq!(normalized.stage_slug, "system-design-review");
        assert_eq!(
            normalized.round_name.as_deref(),
            Some("System Design Review")
        );
    }

    #[test]
    fn missing_stage_and_round_name_use_the_unknown_slug() {
        let mut event = raw();
        event.current_stage = None;
        event.round_name = None;
        let normalized = normalize(&event, &[]).unwrap();
        assert_eq!(normalized.stage_slug, UNKNOWN_ROUND);
    }

    #[test]
    fn completed_counts_as_settled_but_pending_does_not() {
        let mut event = raw();
        event.status = Some("completed".to_string());
        assert!(normalize(&event, &[]).unwrap().confirmed);
        event.status = Some("PENDING".to_string());
        assert!(!normalize(&event, &[]).unwrap().confirmed);
        event.status = None;
        assert!(!normalize(&event, &[]).unwrap().confirmed);
    }

    #[test]
    fn missing_start_fails_closed() {
        let mut event = raw();
        event.start_at = None;
        assert!(matches!(
            normalize(&event, &[]),
            Err(PipecalError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn unparseable_timestamp_fails_closed() {
        let mut event = raw();
        event.end_at = Some("next tuesday-ish".to_string());
        assert!(matches!(
            normalize(&event, &[]),
            Err(PipecalError::MalformedEvent { .. })
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut event = raw();
        event.start_at = Some("2024-03-01T12:30:00Z".to_string());
        event.end_at = Some("2024-03-01T11:30:00Z".to_string());
        assert!(matches!(
            normalize(&event, &[]),
            Err(PipecalError::InvalidTimeRange { .. })
        ));
    }

    #[test]
    fn batch_skips_malformed_records_and_keeps_the_rest() {
        let good = raw();
        let mut bad = raw();
        bad.id = "evt-broken".to_string();
        bad.start_at = None;
        let events = normalize_all(&[bad, good], &[hr_stage()]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "evt-42");
    }

    #[test]
    fn day_buckets_flatten_in_order() {
        let json = serde_json::json!([
            { "date": "2024-03-01", "events": [{ "id": "a" }, { "id": "b" }] },
            { "date": "2024-03-02", "events": [{ "id": "c" }] },
            { "date": "2024-03-03" }
        ]);
        let buckets: Vec<DayBucket> = serde_json::from_value(json).unwrap();
        let ids: Vec<_> = flatten_buckets(buckets)
            .into_iter()
            .map(|raw| raw.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn raw_event_accepts_the_stage_alias() {
        let raw: RawEvent =
            serde_json::from_value(serde_json::json!({ "id": "x", "stage": "stage-7" })).unwrap();
        assert_eq!(raw.current_stage.as_deref(), Some("stage-7"));
    }
}
