//! Terminal rendering for the calendar views.
//!
//! Extension trait over the pure view structures from pipecal-core,
//! using owo_colors truecolor output driven by each event's resolved
//! stage style.

use chrono::Datelike;
use owo_colors::OwoColorize;
use pipecal_core::event::CalendarEvent;
use pipecal_core::stage::{StageStyle, resolve_stage};
use pipecal_core::view::{DayView, MonthView, PositionedEvent, WeekView};

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Parse `#RRGGBB`; unknown shapes fall back to grey.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return (200, 200, 200);
    }
    match (
        u8::from_str_radix(&digits[0..2], 16),
        u8::from_str_radix(&digits[2..4], 16),
        u8::from_str_radix(&digits[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => (r, g, b),
        _ => (200, 200, 200),
    }
}

/// One event line: colored stage marker, times, title, candidate.
fn event_line(event: &CalendarEvent) -> String {
    let style = resolve_stage(&event.stage_slug);
    let (r, g, b) = hex_to_rgb(&style.border);
    let marker = "▐".truecolor(r, g, b).to_string();
    let label = style.label.truecolor(r, g, b).to_string();
    let confirmed = if event.confirmed {
        String::new()
    } else {
        format!(" {}", "(unconfirmed)".dimmed())
    };
    format!(
        "{marker} {}–{} {} · {} [{label}]{confirmed}",
        event.start_label(),
        event.end_label(),
        event.title,
        event.attendee.dimmed(),
    )
}

/// Which hourly row of the grid an event's box starts in.
fn grid_row(positioned: &PositionedEvent<'_>, slot_height: f32) -> i32 {
    (positioned.slot.top / slot_height).floor() as i32
}

impl Render for DayView<'_> {
    fn render(&self) -> String {
        let mut lines = vec![format!("{}", self.date.format("%A %Y-%m-%d").bold())];

        for (row, hour) in self.grid.hours().enumerate() {
            lines.push(format!("{:02}:00 {}", hour, "│".dimmed()));
            for positioned in &self.events {
                if grid_row(positioned, self.grid.slot_height) == row as i32 {
                    lines.push(format!("      {}", event_line(positioned.event)));
                }
            }
        }

        let outside: Vec<_> = self
            .events
            .iter()
            .filter(|positioned| {
                let row = grid_row(positioned, self.grid.slot_height);
                row < 0 || row >= self.grid.slot_count() as i32
            })
            .collect();
        if !outside.is_empty() {
            lines.push("outside the hour grid:".dimmed().to_string());
            for positioned in outside {
                lines.push(format!("      {}", event_line(positioned.event)));
            }
        }

        lines.join("\n")
    }
}

impl Render for WeekView<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        for column in &self.columns {
            lines.push(format!("{}", column.date.format("%a %b %-d").bold()));
            if column.events.is_empty() {
                lines.push(format!("  {}", "no interviews".dimmed()));
            }
            for positioned in &column.events {
                lines.push(format!("  {}", event_line(positioned.event)));
            }
        }
        lines.join("\n")
    }
}

impl Render for MonthView<'_> {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{}",
            "Sun Mon Tue Wed Thu Fri Sat".dimmed()
        )];

        for row in self.rows() {
            let mut cells = Vec::new();
            for cell in row {
                match cell {
                    None => cells.push("   ".to_string()),
                    Some(cell) => {
                        let day = format!("{:>3}", cell.date.day());
                        if cell.visible.is_empty() {
                            cells.push(day);
                        } else {
                            cells.push(day.bold().to_string());
                        }
                    }
                }
            }
            lines.push(cells.join(" "));
        }

        for cell in self.cells.iter().flatten() {
            if cell.visible.is_empty() {
                continue;
            }
            lines.push(format!("{}", cell.date.format("%b %-d").bold()));
            for event in &cell.visible {
                lines.push(format!("  {}", event_line(event)));
            }
            if cell.overflow > 0 {
                lines.push(format!("  {}", format!("+{} more", cell.overflow).dimmed()));
            }
        }

        lines.join("\n")
    }
}

/// Swatch line for the `stages` command.
pub fn stage_line(name: &str, slug: &str) -> String {
    let style: StageStyle = resolve_stage(slug);
    let (r, g, b) = hex_to_rgb(&style.border);
    format!(
        "{} {} {}",
        "██".truecolor(r, g, b),
        name,
        format!("({slug}, {})", style.background).dimmed()
    )
}
