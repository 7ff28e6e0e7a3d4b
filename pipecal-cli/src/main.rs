mod commands;
mod config;
mod render;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use config::PipecalConfig;
use pipecal_core::navigate::ViewMode;

#[derive(Parser)]
#[command(name = "pipecal")]
#[command(about = "Interview-scheduling calendar for your recruiting pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the calendar for a job
    View {
        /// day, week or month
        #[arg(short, long, default_value = "week", value_parser = parse_mode)]
        mode: ViewMode,

        /// Anchor date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Job to show; falls back to the configured default_job
        #[arg(short, long)]
        job: Option<String>,

        /// Step this many windows forward (negative for backward)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// List the interview stages of a job with their colors
    Stages {
        #[arg(short, long)]
        job: Option<String>,
    },
    /// Schedule a new interview
    New {
        /// Application (candidate-on-job) identifier
        application: String,

        title: String,

        /// Start date/time string, forwarded to the service as-is
        #[arg(long)]
        start: String,

        /// End date/time string, forwarded to the service as-is
        #[arg(long)]
        end: String,

        #[arg(long, default_value = "video")]
        location: String,

        /// IANA timezone the interview is scheduled in
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Reminder offsets in minutes before the start (repeatable)
        #[arg(long = "remind")]
        remind: Vec<i64>,
    },
}

fn parse_mode(s: &str) -> Result<ViewMode, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PipecalConfig::load()?;

    match cli.command {
        Commands::View {
            mode,
            date,
            job,
            offset,
        } => commands::view::run(&config, mode, date, job, offset).await,
        Commands::Stages { job } => commands::stages::run(&config, job).await,
        Commands::New {
            application,
            title,
            start,
            end,
            location,
            timezone,
            remind,
        } => {
            commands::new::run(
                &config, application, title, start, end, location, timezone, remind,
            )
            .await
        }
    }
}
