use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use listcheck_actions::PagePort;
use listcheck_cdp_page::BrowserSession;
use listcheck_scenario::{ScenarioConfig, ScenarioDriver};

/// Automated UI checks for a property-listing portal.
#[derive(Debug, Parser)]
#[command(name = "listcheck", version, about)]
struct Cli {
    /// YAML configuration overriding the built-in portal profile
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run with a visible browser window
    #[arg(long)]
    headful: bool,

    /// Override the portal base URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Visit at most this many listings in the reveal check
    #[arg(long, value_name = "N")]
    max_listings: Option<usize>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = format!("{err:#}"), "run aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = match &cli.config {
        Some(path) => ScenarioConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ScenarioConfig::default(),
    };
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(cap) = cli.max_listings {
        config.max_listings = Some(cap);
    }

    let session = BrowserSession::launch(!cli.headful)
        .await
        .context("launching browser")?;
    let result = match session.open_page().await {
        Ok(page) => {
            let port: Arc<dyn PagePort> = Arc::new(page);
            ScenarioDriver::new(port, config).run().await
        }
        Err(err) => Err(err),
    };
    if let Err(err) = session.close().await {
        warn!(error = %err, "browser shutdown failed");
    }

    let report = result.context("running scenario")?;
    println!("{report}");
    Ok(report.all_passed())
}
