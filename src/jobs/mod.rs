pub mod import;
pub mod price;
pub mod pricing;
pub mod rooms;

pub use import::HotelImporter;
pub use price::PriceUpdater;
pub use pricing::{RatingTable, RoomType};
pub use rooms::RoomGenerator;

use crate::storage::models::{hotels_table, rooms_table};
use crate::storage::TableStore;
use crate::utils::Config;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Zusammenfassung eines Job-Laufs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub job: &'static str,
    pub scanned: u64,
    pub written: u64,
    pub skipped: u64,
    pub elapsed: Duration,
}

impl JobReport {
    pub fn new(job: &'static str) -> Self {
        Self {
            job,
            scanned: 0,
            written: 0,
            skipped: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn finish(mut self, started: Instant) -> Self {
        self.elapsed = started.elapsed();

        tracing::info!(
            job = self.job,
            scanned = self.scanned,
            written = self.written,
            skipped = self.skipped,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Job finished"
        );

        self
    }
}

/// Lege Hotels und Rooms Tabellen an (existierende werden übersprungen)
pub async fn create_tables(store: &dyn TableStore, config: &Config) -> Result<JobReport> {
    let started = Instant::now();
    let mut report = JobReport::new("create-tables");

    for spec in [
        hotels_table(&config.store.hotels_table),
        rooms_table(&config.store.rooms_table),
    ] {
        report.scanned += 1;
        let created = store
            .create_table(&spec)
            .await
            .with_context(|| format!("Failed to create table {}", spec.name))?;

        if created {
            report.written += 1;
            tracing::info!(table = %spec.name, "Table created");
        } else {
            report.skipped += 1;
            tracing::warn!(table = %spec.name, "Table already exists");
        }
    }

    Ok(report.finish(started))
}

/// Import -> Price -> Rooms; stoppt beim ersten Fehler
pub async fn seed(store: Arc<dyn TableStore>, config: &Config) -> Result<Vec<JobReport>> {
    let mut reports = Vec::with_capacity(3);

    reports.push(
        HotelImporter::new(store.clone(), &config.store, &config.import)
            .run()
            .await
            .context("Import job failed")?,
    );
    reports.push(
        PriceUpdater::new(store.clone(), &config.store, &config.pricing)
            .run()
            .await
            .context("Price job failed")?,
    );
    reports.push(
        RoomGenerator::new(store, &config.store, &config.rooms)
            .run()
            .await
            .context("Room job failed")?,
    );

    Ok(reports)
}
