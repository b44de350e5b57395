//! crew CLI - writes today's on-call roster for the CI pipeline.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crew::input::{read_time, DEFAULT_INPUT_FILE};
use crew::{Config, Pipeline};

/// Build on-call roster reports from PagerDuty and Slack.
///
/// Settings come from PAGERDUTY_API_KEY, PAGERDUTY_ESCALATION_POLICY,
/// SLACK_TOKEN, SLACK_CHANNEL and CREW_TIMEFRAME.
#[derive(Parser, Debug)]
#[command(name = "crew")]
#[command(version)]
pub struct Cli {
    /// Time resource file holding `{"version": {"time": "<RFC3339>"}}`
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Directory that receives private.txt and wings.txt
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("crew: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "crew=debug,info"
    } else {
        "crew=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: &Cli) -> Result<()> {
    // Configuration is validated before touching the input file or network.
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(?config, "Loaded configuration");

    let now = read_time(&cli.input).context("Could not read time")?;

    let pipeline = Pipeline::from_config(config)?;
    let reports = pipeline.run(now).await?;

    let written = reports
        .write_to(&cli.output_dir)
        .context("Failed to write reports")?;

    tracing::info!(files = written.len(), "On-call reports written");
    Ok(())
}
