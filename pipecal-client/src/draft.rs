//! Create/update payload for interview events.
//!
//! The engine does not validate what the user typed into the
//! scheduling form; the service owns that. The one exception is the
//! timezone name, which is cheap to check locally before a round trip.

use pipecal_core::error::{PipecalError, PipecalResult};
use serde::{Deserialize, Serialize};

/// Passthrough payload for the event create/update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    /// Application (candidate-on-job) identifier.
    pub application: String,
    pub title: String,
    /// User-entered date/time strings, forwarded untouched.
    pub start_at: String,
    pub end_at: String,
    pub location_type: String,
    pub status: String,
    /// IANA timezone name the interview was scheduled in.
    pub timezone: String,
    /// Minutes-before-start reminder offsets.
    pub reminder_preferences: Vec<i64>,
}

impl EventDraft {
    pub fn new(application: &str, title: &str, start_at: &str, end_at: &str) -> Self {
        EventDraft {
            application: application.to_string(),
            title: title.to_string(),
            start_at: start_at.to_string(),
            end_at: end_at.to_string(),
            location_type: "video".to_string(),
            status: "PENDING".to_string(),
            timezone: "UTC".to_string(),
            reminder_preferences: Vec::new(),
        }
    }

    /// Check that the timezone is a real IANA name.
    pub fn validate(&self) -> PipecalResult<()> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| PipecalError::Config(format!("Unknown timezone '{}'", self.timezone)))?;
        Ok(())
    }
}
