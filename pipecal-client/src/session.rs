//! The host-facing fetch session.
//!
//! `CalendarSession` owns the view state and the current window's
//! normalized events. Every dispatched action runs the pure reducer
//! and then reloads the window. Reloads are superseded, not queued: a
//! reload takes a generation token, and a response whose token is no
//! longer current is discarded, so a slow earlier fetch can never
//! overwrite a later window's events. The in-flight task is also
//! aborted when superseded and when the session is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::task::JoinHandle;

use pipecal_core::event::CalendarEvent;
use pipecal_core::navigate::{ViewAction, ViewState, reduce};
use pipecal_core::normalize::normalize_all;
use pipecal_core::stage::PipelineStage;

use crate::api::ScheduleApi;

/// What the host renders for the current window.
#[derive(Debug, Clone, Default)]
pub struct WindowSnapshot {
    pub events: Vec<CalendarEvent>,
    pub loading: bool,
    /// The generic load-failure banner text, when the last fetch failed.
    pub error: Option<String>,
}

pub struct CalendarSession {
    api: Arc<ScheduleApi>,
    job_id: String,
    stages: Arc<Vec<PipelineStage>>,
    state: ViewState,
    generation: Arc<AtomicU64>,
    snapshot: Arc<Mutex<WindowSnapshot>>,
    in_flight: Option<JoinHandle<()>>,
}

impl CalendarSession {
    /// New session in the default state: week view anchored on today.
    /// No fetch happens until the first `dispatch` or `reload`.
    pub fn new(
        api: ScheduleApi,
        job_id: String,
        stages: Vec<PipelineStage>,
        today: NaiveDate,
    ) -> Self {
        CalendarSession {
            api: Arc::new(api),
            job_id,
            stages: Arc::new(stages),
            state: ViewState::new(today),
            generation: Arc::new(AtomicU64::new(0)),
            snapshot: Arc::new(Mutex::new(WindowSnapshot::default())),
            in_flight: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        self.snapshot.lock().expect("snapshot lock").clone()
    }

    /// Apply an action and reload the (possibly new) window.
    pub fn dispatch(&mut self, action: ViewAction) {
        self.state = reduce(self.state, action);
        self.reload();
    }

    /// Start fetching the current window, superseding any fetch still
    /// in flight.
    pub fn reload(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(stale) = self.in_flight.take() {
            stale.abort();
        }
        {
            let mut snapshot = self.snapshot.lock().expect("snapshot lock");
            snapshot.loading = true;
        }

        let api = Arc::clone(&self.api);
        let job_id = self.job_id.clone();
        let stages = Arc::clone(&self.stages);
        let latest = Arc::clone(&self.generation);
        let snapshot = Arc::clone(&self.snapshot);
        let mode = self.state.mode;
        let window = self.state.window();

        self.in_flight = Some(tokio::spawn(async move {
            let result = api.fetch_events(mode, window.start, &job_id).await;

            // No awaits below this point; the lock is held briefly.
            let mut snapshot = snapshot.lock().expect("snapshot lock");
            if latest.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "discarding superseded fetch");
                return;
            }
            snapshot.loading = false;
            match result {
                Ok(raws) => {
                    snapshot.events = normalize_all(&raws, &stages);
                    snapshot.error = None;
                }
                Err(error) => {
                    tracing::warn!(%error, "window fetch failed");
                    snapshot.events.clear();
                    snapshot.error = Some(error.user_message().to_string());
                }
            }
        }));
    }

    /// Wait for the in-flight fetch, if any, to finish.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            // An aborted task resolves with a JoinError; that is fine.
            let _ = handle.await;
        }
    }
}

impl Drop for CalendarSession {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
