//! Predator-prey simulation runner.

use anyhow::{Context, Result};
use clap::Parser;
use predprey_cli::{cli::Cli, runner, telemetry};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry()?;
    info!("Starting predprey {}", env!("CARGO_PKG_VERSION"));

    let config = cli.to_config()?;
    let summary = runner::run(&config)?;

    if let Some(path) = &cli.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
