use crate::jobs::pricing::{default_ratings, default_room_types, RatingScore, RoomType};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "hotel-seeder.toml";
pub const ENV_PREFIX: &str = "SEEDER";

/// Hauptkonfiguration für den Hotel Seeder
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub import: ImportConfig,
    pub pricing: PricingConfig,
    pub rooms: RoomsConfig,
    pub logging: LoggingConfig,
    /// Prometheus textfile output, written after each run
    pub metrics_file: Option<PathBuf>,
}

impl Config {
    /// Lade Config: Defaults < TOML Datei < SEEDER_* Environment Variablen
    ///
    /// An explicitly given file must exist; the default `hotel-seeder.toml`
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let settings = config::Config::builder()
            .add_source(config::File::from(file).required(path.is_some()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to load config from {}", file.display()))?;

        settings
            .try_deserialize()
            .context("Invalid hotel-seeder configuration")
    }
}

/// DynamoDB Verbindung und Tabellennamen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub region: String,
    /// Empty means the SDK's default endpoint resolution
    pub endpoint_url: String,
    pub hotels_table: String,
    pub rooms_table: String,
    /// Scan `Limit` per page, unset lets DynamoDB decide
    pub page_size: Option<i32>,
    /// Static dummy credentials, as DynamoDB Local expects
    pub local_credentials: bool,
}

impl StoreConfig {
    pub fn endpoint(&self) -> Option<&str> {
        let endpoint = self.endpoint_url.trim();
        (!endpoint.is_empty()).then_some(endpoint)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            endpoint_url: "http://localhost:8000".to_string(),
            hotels_table: "Hotels".to_string(),
            rooms_table: "Rooms".to_string(),
            page_size: None,
            local_credentials: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub file: PathBuf,
    pub encoding: String,
    pub country: String,
    pub skip_existing: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("hotels.csv"),
            encoding: "ISO-8859-1".to_string(),
            country: "New Zealand".to_string(),
            skip_existing: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub ratings: Vec<RatingScore>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            ratings: default_ratings(),
        }
    }
}

/// Was der Room-Job mit Hotels ohne `price` macht
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingPricePolicy {
    /// Log a warning and generate no rooms for the hotel
    #[default]
    Skip,
    /// Treat the price as 0
    Zero,
    /// Abort the run
    Fail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoomsConfig {
    pub types: Vec<RoomType>,
    pub total: u32,
    pub available: u32,
    pub missing_price: MissingPricePolicy,
    pub skip_existing: bool,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            types: default_room_types(),
            total: 10,
            available: 10,
            missing_price: MissingPricePolicy::default(),
            skip_existing: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Fallback filter when RUST_LOG is unset
    pub filter: String,
    /// Daily rolling JSON log file in this directory
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: "info".to_string(),
            directory: None,
        }
    }
}
