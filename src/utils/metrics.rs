use crate::jobs::JobReport;
use anyhow::{Context, Result};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::path::Path;

/// Prometheus Metrics für Job-Läufe (Textfile-Collector Format)
pub struct Metrics {
    registry: Registry,
    records: IntCounterVec,
    runs: IntCounterVec,
    job_duration: HistogramVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let records = IntCounterVec::new(
            Opts::new("seeder_records_total", "Records processed per job and outcome"),
            &["job", "outcome"],
        )?;

        let runs = IntCounterVec::new(
            Opts::new("seeder_runs_total", "Command runs by final status"),
            &["command", "status"],
        )?;

        let job_duration = HistogramVec::new(
            HistogramOpts::new("seeder_job_duration_seconds", "Job run time in seconds"),
            &["job"],
        )?;

        registry.register(Box::new(records.clone()))?;
        registry.register(Box::new(runs.clone()))?;
        registry.register(Box::new(job_duration.clone()))?;

        Ok(Self {
            registry,
            records,
            runs,
            job_duration,
        })
    }

    pub fn record(&self, report: &JobReport) {
        for (outcome, count) in [
            ("scanned", report.scanned),
            ("written", report.written),
            ("skipped", report.skipped),
        ] {
            self.records
                .with_label_values(&[report.job, outcome])
                .inc_by(count);
        }

        self.job_duration
            .with_label_values(&[report.job])
            .observe(report.elapsed.as_secs_f64());
    }

    /// Zähle einen Lauf als "success" oder "failed"
    pub fn record_run(&self, command: &str, success: bool) {
        let status = if success { "success" } else { "failed" };
        self.runs.with_label_values(&[command, status]).inc();
    }

    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn write_textfile(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render()?)
            .with_context(|| format!("Failed to write metrics to {}", path.display()))
    }
}
