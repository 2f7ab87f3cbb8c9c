use crate::utils::config::{Config, MissingPricePolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Seed and maintain hotel and room data in DynamoDB")]
pub struct Cli {
    /// Path to the config file (default: hotel-seeder.toml, optional)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// DynamoDB endpoint override, "" for the AWS default endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the Hotels and Rooms tables
    CreateTables,

    /// Import hotels of one country from the CSV export
    Import {
        /// Path to the CSV export
        #[arg(long)]
        file: Option<PathBuf>,

        /// Exact value of the countyName column to import
        #[arg(long)]
        country: Option<String>,

        /// Text encoding label of the export (e.g. ISO-8859-1)
        #[arg(long)]
        encoding: Option<String>,

        /// Skip rows whose hotelCode is already in the Hotels table
        #[arg(long)]
        skip_existing: bool,
    },

    /// Recalculate every hotel price from its star rating
    Price,

    /// Generate the configured room types for every hotel
    Rooms {
        /// Skip hotels that already have rooms
        #[arg(long)]
        skip_existing: bool,

        /// What to do with hotels that have no price yet
        #[arg(long, value_enum)]
        missing_price: Option<MissingPricePolicy>,
    },

    /// Run import, price and rooms in order
    Seed {
        /// Path to the CSV export
        #[arg(long)]
        file: Option<PathBuf>,

        /// Skip hotels and rooms that already exist
        #[arg(long)]
        skip_existing: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::CreateTables => "create-tables",
            Commands::Import { .. } => "import",
            Commands::Price => "price",
            Commands::Rooms { .. } => "rooms",
            Commands::Seed { .. } => "seed",
        }
    }
}

impl Cli {
    /// CLI Flags überschreiben Datei- und Env-Werte
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.store.endpoint_url = endpoint.clone();
        }

        match &self.command {
            Commands::Import {
                file,
                country,
                encoding,
                skip_existing,
            } => {
                if let Some(file) = file {
                    config.import.file = file.clone();
                }
                if let Some(country) = country {
                    config.import.country = country.clone();
                }
                if let Some(encoding) = encoding {
                    config.import.encoding = encoding.clone();
                }
                config.import.skip_existing |= *skip_existing;
            }
            Commands::Rooms {
                skip_existing,
                missing_price,
            } => {
                config.rooms.skip_existing |= *skip_existing;
                if let Some(policy) = missing_price {
                    config.rooms.missing_price = *policy;
                }
            }
            Commands::Seed { file, skip_existing } => {
                if let Some(file) = file {
                    config.import.file = file.clone();
                }
                config.import.skip_existing |= *skip_existing;
                config.rooms.skip_existing |= *skip_existing;
            }
            Commands::CreateTables | Commands::Price => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_overrides() {
        let cli = Cli::parse_from([
            "hotel-seeder",
            "import",
            "--file",
            "data/hotels.csv",
            "--country",
            "Fiji",
            "--skip-existing",
            "--endpoint",
            "http://dynamo:8000",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(cli.command.name(), "import");
        assert_eq!(config.import.file, PathBuf::from("data/hotels.csv"));
        assert_eq!(config.import.country, "Fiji");
        assert!(config.import.skip_existing);
        assert!(!config.rooms.skip_existing);
        assert_eq!(config.store.endpoint_url, "http://dynamo:8000");
    }

    #[test]
    fn test_rooms_missing_price_flag() {
        let cli = Cli::parse_from(["hotel-seeder", "rooms", "--missing-price", "fail"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.rooms.missing_price, MissingPricePolicy::Fail);
        assert!(!config.rooms.skip_existing);
    }

    #[test]
    fn test_seed_skip_existing_covers_both_jobs() {
        let cli = Cli::parse_from(["hotel-seeder", "seed", "--skip-existing"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert!(config.import.skip_existing);
        assert!(config.rooms.skip_existing);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
