//! Core scheduling engine for the pipecal interview calendar.
//!
//! This crate holds everything that is pure computation:
//! - `event`: the canonical `CalendarEvent` model
//! - `navigate`: view state, date windows, and prev/next/today stepping
//! - `layout`: the fixed per-hour time grid geometry
//! - `stage`: pipeline-stage colors and labels
//! - `normalize`: raw scheduling-service payloads -> `CalendarEvent`
//! - `view`: day/week/month view builders and click intents
//!
//! Fetching events over HTTP lives in `pipecal-client`; this crate does
//! no I/O.

pub mod error;
pub mod event;
pub mod layout;
pub mod navigate;
pub mod normalize;
pub mod stage;
pub mod view;

pub use error::{PipecalError, PipecalResult};
pub use event::CalendarEvent;
pub use navigate::{DateWindow, StepDirection, ViewAction, ViewMode, ViewState};
pub use stage::{PipelineStage, StageStyle};
