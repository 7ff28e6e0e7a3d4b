use anyhow::Result;
use owo_colors::OwoColorize;

use pipecal_client::ScheduleApi;

use crate::config::PipecalConfig;
use crate::render::stage_line;

pub async fn run(config: &PipecalConfig, job: Option<String>) -> Result<()> {
    let job = config.resolve_job(job)?;
    let api = ScheduleApi::new(&config.api_base)?;
    let stages = api.fetch_stages(&job).await?;

    if stages.is_empty() {
        println!("{}", "No interview stages for this job".dimmed());
        return Ok(());
    }

    for stage in &stages {
        println!("{}", stage_line(&stage.name, &stage.slug));
    }

    Ok(())
}
