//! Time-grid geometry for the day and week views.
//!
//! The grid is linear in minutes: one hour of wall-clock time maps to
//! `slot_height` display units, with `day_start_hour` at offset zero.
//! Events before the first slot or after the last produce out-of-range
//! values on purpose; clipping and scrolling are the host's job.

use chrono::{NaiveTime, Timelike};

/// Fixed per-hour grid configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// First slot of the grid (hour of day).
    pub day_start_hour: u32,
    /// Hour after the last slot; 9..17 gives eight hourly slots.
    pub day_end_hour: u32,
    /// Display units per hour.
    pub slot_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            day_start_hour: 9,
            day_end_hour: 17,
            slot_height: 80.0,
        }
    }
}

impl GridConfig {
    /// The hourly slot labels of the grid, in order.
    pub fn hours(&self) -> impl Iterator<Item = u32> + use<> {
        self.day_start_hour..self.day_end_hour
    }

    pub fn slot_count(&self) -> u32 {
        self.day_end_hour.saturating_sub(self.day_start_hour)
    }
}

/// Vertical placement of one event within a day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotBox {
    /// Offset from the top of the grid, in `slot_height` units per hour.
    pub top: f32,
    pub height: f32,
}

impl SlotBox {
    /// A non-positive height means end <= start; callers render such
    /// events with a minimum height instead of this box.
    pub fn is_degenerate(&self) -> bool {
        self.height <= 0.0
    }
}

/// Position an event's time span on the grid.
///
/// No validation happens here: a span ending at or before its start
/// simply yields a non-positive height (see `SlotBox::is_degenerate`).
pub fn slot_box(start: NaiveTime, end: NaiveTime, grid: &GridConfig) -> SlotBox {
    let start_minutes = minutes_since_midnight(start);
    let end_minutes = minutes_since_midnight(end);
    let origin = (grid.day_start_hour * 60) as f32;
    SlotBox {
        top: (start_minutes - origin) / 60.0 * grid.slot_height,
        height: (end_minutes - start_minutes) / 60.0 * grid.slot_height,
    }
}

fn minutes_since_midnight(time: NaiveTime) -> f32 {
    (time.hour() * 60 + time.minute()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn positions_the_reference_event() {
        // 11:30-12:30 with a 9:00 grid start and 80-unit slots.
        let slot = slot_box(time(11, 30), time(12, 30), &GridConfig::default());
        assert_eq!(slot.top, 200.0);
        assert_eq!(slot.height, 80.0);
    }

    #[test]
    fn height_is_linear_in_duration() {
        let grid = GridConfig::default();
        let one_hour = slot_box(time(10, 0), time(11, 0), &grid);
        let two_hours = slot_box(time(10, 0), time(12, 0), &grid);
        assert_eq!(two_hours.height, one_hour.height * 2.0);
    }

    #[test]
    fn events_before_the_grid_start_go_negative() {
        let slot = slot_box(time(8, 0), time(8, 30), &GridConfig::default());
        assert_eq!(slot.top, -80.0);
        assert_eq!(slot.height, 40.0);
    }

    #[test]
    fn inverted_span_is_degenerate_not_a_panic() {
        let slot = slot_box(time(12, 0), time(11, 0), &GridConfig::default());
        assert!(slot.is_degenerate());
        assert_eq!(slot.height, -80.0);
    }

    #[test]
    fn default_grid_has_eight_slots() {
        let grid = GridConfig::default();
        assert_eq!(grid.slot_count(), 8);
        assert_eq!(grid.hours().collect::<Vec<_>>(), (9..17).collect::<Vec<_>>());
    }
}
