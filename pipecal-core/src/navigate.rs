//! View state and date-range navigation.
//!
//! The host owns a `ViewState` and mutates it only through `reduce`,
//! so navigation is testable without a UI harness. `window` turns the
//! state into the concrete date range to fetch and render.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Which calendar view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

impl ViewMode {
    /// Wire form used by the event-fetch endpoint's `view` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(ViewMode::Day),
            "week" => Ok(ViewMode::Week),
            "month" => Ok(ViewMode::Month),
            other => Err(format!("Unknown view mode '{other}'. Expected day, week or month")),
        }
    }
}

/// Inclusive date range implied by `(mode, anchor)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate every date in the window.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let mut current = Some(self.start);
        let end = self.end;
        std::iter::from_fn(move || {
            let date = current?;
            current = if date < end { date.succ_opt() } else { None };
            Some(date)
        })
    }
}

/// The state driving the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub anchor: NaiveDate,
}

impl ViewState {
    /// Initial state: week view anchored on today.
    pub fn new(today: NaiveDate) -> Self {
        ViewState {
            mode: ViewMode::Week,
            anchor: today,
        }
    }

    pub fn window(&self) -> DateWindow {
        window(self.mode, self.anchor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Prev,
    Next,
}

/// Actions the host can dispatch against a `ViewState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    Prev,
    Next,
    /// Reset the anchor to the given current date, keeping the mode.
    Today(NaiveDate),
    SetMode(ViewMode),
    SetAnchor(NaiveDate),
}

/// Pure reducer over view state.
pub fn reduce(state: ViewState, action: ViewAction) -> ViewState {
    match action {
        ViewAction::Prev => ViewState {
            anchor: step(state.mode, state.anchor, StepDirection::Prev),
            ..state
        },
        ViewAction::Next => ViewState {
            anchor: step(state.mode, state.anchor, StepDirection::Next),
            ..state
        },
        ViewAction::Today(today) => ViewState {
            anchor: today,
            ..state
        },
        ViewAction::SetMode(mode) => ViewState { mode, ..state },
        ViewAction::SetAnchor(anchor) => ViewState { anchor, ..state },
    }
}

/// The visible date window for a mode and anchor.
///
/// Weeks start on the Monday on or before the anchor. The month window
/// uses real month lengths, never an assumed 30/31.
pub fn window(mode: ViewMode, anchor: NaiveDate) -> DateWindow {
    match mode {
        ViewMode::Day => DateWindow {
            start: anchor,
            end: anchor,
        },
        ViewMode::Week => {
            let monday = anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()));
            DateWindow {
                start: monday,
                end: monday + Duration::days(6),
            }
        }
        ViewMode::Month => {
            let first = first_of_month(anchor);
            DateWindow {
                start: first,
                end: last_of_month(anchor),
            }
        }
    }
}

/// Step the anchor one unit in the given direction.
///
/// Month steps clamp the day-of-month, so Jan 31 -> Feb 29/28 rather
/// than skipping February.
pub fn step(mode: ViewMode, anchor: NaiveDate, direction: StepDirection) -> NaiveDate {
    let days = |n: i64| match direction {
        StepDirection::Prev => anchor - Duration::days(n),
        StepDirection::Next => anchor + Duration::days(n),
    };
    match mode {
        ViewMode::Day => days(1),
        ViewMode::Week => days(7),
        ViewMode::Month => {
            let month = Months::new(1);
            let stepped = match direction {
                StepDirection::Prev => anchor.checked_sub_months(month),
                StepDirection::Next => anchor.checked_add_months(month),
            };
            // Only fails at the representable-date limits.
            stepped.unwrap_or(anchor)
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 always exists.
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}
