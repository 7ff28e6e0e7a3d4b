use anyhow::Result;
use owo_colors::OwoColorize;

use pipecal_client::{EventDraft, ScheduleApi};

use crate::config::PipecalConfig;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    config: &PipecalConfig,
    application: String,
    title: String,
    start: String,
    end: String,
    location: String,
    timezone: String,
    remind: Vec<i64>,
) -> Result<()> {
    let api = ScheduleApi::new(&config.api_base)?;

    let mut draft = EventDraft::new(&application, &title, &start, &end);
    draft.location_type = location;
    draft.timezone = timezone;
    draft.reminder_preferences = remind;
    draft.validate()?;

    let created = api.create_event(&draft).await?;
    println!("{}", format!("Created: {} ({})", draft.title, created.id).green());

    Ok(())
}
