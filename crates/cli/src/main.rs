mod commands;
mod metrics;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subrank_core::{load_config, validate_config, Config, ScoreRegistry};

use commands::Cli;

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output only.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var("SUBRANK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("subrank.toml"));

    let config = if config_path.exists() {
        info!("Loading configuration from {:?}", config_path);
        load_config(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        info!("No config at {:?}, using default scores", config_path);
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;

    let registry = ScoreRegistry::from_config(&config).context("Failed to build score tables")?;

    let name = cli.command.name();
    let output = match cli.command.execute(&registry) {
        Ok(output) => {
            metrics::COMMANDS_TOTAL.with_label_values(&[name, "ok"]).inc();
            output
        }
        Err(e) => {
            metrics::COMMANDS_TOTAL
                .with_label_values(&[name, "error"])
                .inc();
            return Err(e);
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.metrics {
        print!("{}", metrics::encode_metrics());
    }

    Ok(())
}
