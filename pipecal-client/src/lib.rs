//! HTTP boundary for the pipecal scheduling service.
//!
//! - `api`: thin async wrappers over the service endpoints
//! - `draft`: the create/update passthrough payload
//! - `session`: view state + window fetching with stale-response
//!   supersession

pub mod api;
pub mod draft;
pub mod session;

pub use api::ScheduleApi;
pub use draft::EventDraft;
pub use session::{CalendarSession, WindowSnapshot};
