use anyhow::Result;
use chrono::{NaiveDate, Utc};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;
use std::time::Duration;

use pipecal_client::{CalendarSession, ScheduleApi};
use pipecal_core::layout::GridConfig;
use pipecal_core::navigate::{ViewAction, ViewMode};
use pipecal_core::view::{DayView, MonthView, WeekView};

use crate::config::PipecalConfig;
use crate::render::Render;

pub async fn run(
    config: &PipecalConfig,
    mode: ViewMode,
    date: Option<NaiveDate>,
    job: Option<String>,
    offset: i32,
) -> Result<()> {
    let job = config.resolve_job(job)?;
    let api = ScheduleApi::new(&config.api_base)?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Loading stages...");
    let stages = api.fetch_stages(&job).await?;

    let today = Utc::now().date_naive();
    let mut session = CalendarSession::new(api, job, stages, today);
    session.dispatch(ViewAction::SetMode(mode));
    if let Some(date) = date {
        session.dispatch(ViewAction::SetAnchor(date));
    }
    for _ in 0..offset.abs() {
        session.dispatch(if offset < 0 {
            ViewAction::Prev
        } else {
            ViewAction::Next
        });
    }

    spinner.set_message("Loading events...");
    session.settled().await;
    spinner.finish_and_clear();

    let snapshot = session.snapshot();
    if let Some(error) = &snapshot.error {
        // Non-fatal: the window just renders empty.
        eprintln!("{}", error.red());
        return Ok(());
    }

    let window = session.state().window();
    let grid = GridConfig::default();
    let rendered = match mode {
        ViewMode::Day => DayView::build(window.start, &snapshot.events, grid).render(),
        ViewMode::Week => WeekView::build(window, &snapshot.events, grid).render(),
        ViewMode::Month => MonthView::build(window, &snapshot.events).render(),
    };
    println!("{rendered}");

    Ok(())
}
