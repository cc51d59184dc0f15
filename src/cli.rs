//! Command-line interface components.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{ClimateApiConfig, LoggingConfig};

#[derive(Parser, Debug)]
#[command(name = "climate-api")]
#[command(about = "Serve station precipitation and temperature observations as JSON")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite dataset to serve, overrides `database.path`
    #[arg(short, long, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// Interface to bind, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overrides `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Fold command-line overrides into a loaded configuration
    pub fn apply_to(&self, config: &mut ClimateApiConfig) -> Result<()> {
        if let Some(database) = &self.database {
            config.database.path = database.clone();
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        config.validate()
    }
}

/// Set up structured logging. `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "climate_api={level},tower_http={level}",
            level = logging.level
        ))
    });

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    debug!("Logging initialized at level: {}", logging.level);
    Ok(())
}
