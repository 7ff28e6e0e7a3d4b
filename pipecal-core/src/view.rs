//! Day, week, and month view builders.
//!
//! Each builder is a pure function of `(window, events)`: it borrows
//! the normalized event list, never mutates it, and produces a
//! display-ready structure plus the click intents the host dispatches
//! upward.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::event::CalendarEvent;
use crate::layout::{GridConfig, SlotBox, slot_box};
use crate::navigate::DateWindow;

/// Height given to an event whose span collapsed (end <= start), so a
/// malformed record still shows up as something clickable instead of a
/// negative box.
pub const MIN_EVENT_HEIGHT: f32 = 20.0;

/// How many events a month cell lists before "+N more".
pub const MONTH_CELL_EVENTS: usize = 3;

/// Default time attached to a month-cell click.
const MONTH_DEFAULT_HOUR: u32 = 9;

/// What the user asked for by clicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start scheduling at this date and time (empty slot or day cell).
    CreateAt { date: NaiveDate, time: NaiveTime },
    /// Open an existing event.
    OpenEvent { id: String },
}

/// An event with its resolved grid geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedEvent<'a> {
    pub event: &'a CalendarEvent,
    pub slot: SlotBox,
}

impl<'a> PositionedEvent<'a> {
    fn new(event: &'a CalendarEvent, grid: &GridConfig) -> Self {
        let mut slot = slot_box(event.start_time, event.end_time, grid);
        if slot.is_degenerate() {
            slot = SlotBox {
                top: slot.top,
                height: MIN_EVENT_HEIGHT,
            };
        }
        PositionedEvent { event, slot }
    }

    pub fn intent(&self) -> Intent {
        Intent::OpenEvent {
            id: self.event.id.clone(),
        }
    }
}

/// One column of positioned events for a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub grid: GridConfig,
    pub events: Vec<PositionedEvent<'a>>,
}

impl<'a> DayView<'a> {
    /// Build the column for `date`, keeping only that date's events,
    /// in their incoming order.
    pub fn build(date: NaiveDate, events: &'a [CalendarEvent], grid: GridConfig) -> Self {
        let events = events
            .iter()
            .filter(|event| event.date == date)
            .map(|event| PositionedEvent::new(event, &grid))
            .collect();
        DayView { date, grid, events }
    }

    /// Intent for a click on the empty slot at `hour`.
    pub fn slot_intent(&self, hour: u32) -> Option<Intent> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
        Some(Intent::CreateAt {
            date: self.date,
            time,
        })
    }
}

/// Seven Monday-first columns.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekView<'a> {
    pub columns: Vec<DayView<'a>>,
}

impl<'a> WeekView<'a> {
    /// Build from a week window (see `navigate::window`); each column
    /// filters and positions its own date's events independently.
    pub fn build(window: DateWindow, events: &'a [CalendarEvent], grid: GridConfig) -> Self {
        let columns = (0..7)
            .map(|offset| window.start + Duration::days(offset))
            .map(|date| DayView::build(date, events, grid))
            .collect();
        WeekView { columns }
    }
}

/// One non-empty cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    /// Up to `MONTH_CELL_EVENTS` events, in insertion order.
    pub visible: Vec<&'a CalendarEvent>,
    /// How many further events the cell holds ("+N more").
    pub overflow: usize,
}

impl MonthCell<'_> {
    /// Clicking a day cell schedules at 09:00 by default.
    pub fn intent(&self) -> Intent {
        Intent::CreateAt {
            date: self.date,
            time: NaiveTime::from_hms_opt(MONTH_DEFAULT_HOUR, 0, 0)
                .expect("constant hour is valid"),
        }
    }
}

/// A 7-wide month grid with leading `None` cells for the weekday
/// offset of day 1 (Sunday = 0) and no trailing padding.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView<'a> {
    pub cells: Vec<Option<MonthCell<'a>>>,
}

impl<'a> MonthView<'a> {
    /// Build from a month window (first-of-month to last-of-month).
    pub fn build(window: DateWindow, events: &'a [CalendarEvent]) -> Self {
        let leading = window.start.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<Option<MonthCell<'a>>> = vec![None; leading];

        for date in window.days() {
            let day_events: Vec<&CalendarEvent> =
                events.iter().filter(|event| event.date == date).collect();
            let overflow = day_events.len().saturating_sub(MONTH_CELL_EVENTS);
            let visible = day_events.into_iter().take(MONTH_CELL_EVENTS).collect();
            cells.push(Some(MonthCell {
                date,
                visible,
                overflow,
            }));
        }

        MonthView { cells }
    }

    /// The grid split into 7-column rows; the last row may be short.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<MonthCell<'a>>]> {
        self.cells.chunks(7)
    }
}
