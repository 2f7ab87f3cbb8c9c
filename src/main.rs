use anyhow::Result;
use clap::Parser;
use hotel_seeder::cli::{Cli, Commands};
use hotel_seeder::jobs::{self, HotelImporter, JobReport, PriceUpdater, RoomGenerator};
use hotel_seeder::storage::{DynamoDBStore, TableStore};
use hotel_seeder::utils::{self, Config};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = utils::Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    // Guard muss bis zum Ende leben, sonst gehen File-Logs verloren
    let _log_guard = utils::init_logging(&config.logging);

    tracing::info!(
        command = cli.command.name(),
        hotels_table = %config.store.hotels_table,
        rooms_table = %config.store.rooms_table,
        "Starting hotel seeder"
    );

    let metrics = utils::Metrics::new()?;
    let outcome = run(&cli.command, &config).await;

    // Auch fehlgeschlagene Läufe landen im Textfile
    match &outcome {
        Ok(reports) => {
            for report in reports {
                metrics.record(report);
            }
            metrics.record_run(cli.command.name(), true);
        }
        Err(e) => {
            tracing::error!(command = cli.command.name(), error = %format!("{:#}", e), "Run failed");
            metrics.record_run(cli.command.name(), false);
        }
    }
    if let Some(path) = &config.metrics_file {
        metrics.write_textfile(path)?;
        tracing::info!(path = %path.display(), "Metrics written");
    }

    outcome?;
    tracing::info!(command = cli.command.name(), "Done");

    Ok(())
}

async fn run(command: &Commands, config: &Config) -> Result<Vec<JobReport>> {
    // Ein Store für alle Jobs
    let store: Arc<dyn TableStore> = Arc::new(DynamoDBStore::connect(&config.store).await?);

    let reports = match command {
        Commands::CreateTables => vec![jobs::create_tables(store.as_ref(), config).await?],
        Commands::Import { .. } => {
            vec![HotelImporter::new(store, &config.store, &config.import).run().await?]
        }
        Commands::Price => {
            vec![PriceUpdater::new(store, &config.store, &config.pricing).run().await?]
        }
        Commands::Rooms { .. } => {
            vec![RoomGenerator::new(store, &config.store, &config.rooms).run().await?]
        }
        Commands::Seed { .. } => jobs::seed(store, config).await?,
    };

    Ok(reports)
}
