use anyhow::{Context, Result};
use clap::Parser;

use climate_api::cli::{self, Args};
use climate_api::config::ClimateApiConfig;
use climate_api::observations::ObservationService;
use climate_api::store::Database;
use climate_api::web;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ClimateApiConfig::load_from_path(args.config.clone())?;
    args.apply_to(&mut config)?;

    cli::setup_logging(&config.logging)?;

    let database = Database::open(&config.database.path).with_context(|| {
        format!(
            "Failed to open observation database {}",
            config.database.path.display()
        )
    })?;
    let service = ObservationService::new(database, &config.query);
    tracing::info!(
        "Temperature routes pinned to station {}",
        service.station()
    );

    web::run(service, &config.bind_address()).await
}
