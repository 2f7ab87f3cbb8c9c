use crate::jobs::JobReport;
use crate::sheet::{CellValue, Sheet};
use crate::storage::models::{get_text, HotelItem, COUNTRY_NAME_COLUMN, HOTEL_CODE, HOTEL_COLUMNS};
use crate::storage::{TableScan, TableStore};
use crate::utils::config::{ImportConfig, StoreConfig};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Import der Hotels aus dem CSV Export
pub struct HotelImporter {
    store: Arc<dyn TableStore>,
    hotels_table: String,
    file: PathBuf,
    encoding: String,
    country: String,
    skip_existing: bool,
}

impl HotelImporter {
    pub fn new(store: Arc<dyn TableStore>, store_config: &StoreConfig, config: &ImportConfig) -> Self {
        Self {
            store,
            hotels_table: store_config.hotels_table.clone(),
            file: config.file.clone(),
            encoding: config.encoding.clone(),
            country: config.country.clone(),
            skip_existing: config.skip_existing,
        }
    }

    /// One put per row of the configured country. Without `skip_existing`
    /// every run writes fresh hotel ids, so reimports duplicate hotels.
    pub async fn run(&self) -> Result<JobReport> {
        let started = Instant::now();
        let mut report = JobReport::new("import");

        let sheet = Sheet::from_path(&self.file, &self.encoding)
            .with_context(|| format!("Failed to read hotel export {}", self.file.display()))?;
        sheet.require_columns(&HOTEL_COLUMNS)?;

        tracing::info!(
            file = %self.file.display(),
            rows = sheet.len(),
            country = %self.country,
            "Loaded hotel export"
        );

        let existing = if self.skip_existing {
            self.existing_hotel_codes().await?
        } else {
            HashSet::new()
        };

        for row in sheet.rows() {
            report.scanned += 1;

            if !row.get(COUNTRY_NAME_COLUMN)?.is_text(&self.country) {
                report.skipped += 1;
                continue;
            }

            let hotel = HotelItem::from_row(&row)?;
            let hotel_code = hotel.hotel_code.to_string();
            // Ohne HotelCode gibt es nichts zum Abgleichen
            let has_code = hotel.hotel_code != CellValue::MISSING;
            if has_code && existing.contains(&hotel_code) {
                report.skipped += 1;
                tracing::debug!(hotel_code = %hotel_code, "Hotel already imported");
                continue;
            }

            self.store
                .put_item(&self.hotels_table, hotel.to_item())
                .await
                .with_context(|| format!("Failed to store hotel {}", hotel_code))?;
            report.written += 1;

            tracing::info!(
                hotel_id = %hotel.hotel_id,
                hotel_code = %hotel_code,
                hotel_name = %hotel.hotel_name,
                "Imported hotel"
            );
        }

        Ok(report.finish(started))
    }

    async fn existing_hotel_codes(&self) -> Result<HashSet<String>> {
        let mut codes = HashSet::new();
        let mut scan = TableScan::new(self.store.as_ref(), &self.hotels_table);

        while let Some(items) = scan.next_page().await? {
            codes.extend(items.iter().filter_map(|item| get_text(item, HOTEL_CODE)));
        }

        tracing::info!(hotels = codes.len(), "Loaded existing hotel codes");
        Ok(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::{HOTEL_ID, HOTEL_RATING};
    use crate::storage::MemoryStore;
    use aws_sdk_dynamodb::types::AttributeValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "countyCode, countyName, cityCode, cityName, HotelCode, HotelName, HotelRating, Address, Attractions, Description, FaxNumber, HotelFacilities, Map, PhoneNumber, PinCode, HotelWebsiteUrl";

    fn export(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    fn importer(store: Arc<MemoryStore>, file: &NamedTempFile, skip_existing: bool) -> HotelImporter {
        let config = ImportConfig {
            file: file.path().to_path_buf(),
            skip_existing,
            ..ImportConfig::default()
        };
        HotelImporter::new(store, &StoreConfig::default(), &config)
    }

    const ROWS: [&str; 3] = [
        "NZ,New Zealand,1001,Queenstown,1402689,Lakeside Lodge,FourStar,1 Lake Esplanade,,Quiet,,Wifi,-45.03|168.66,,9300,",
        "AU,Australia,2001,Sydney,1300001,Harbour Inn,ThreeStar,2 George St,,Busy,,Pool,-33.86|151.2,,2000,",
        "NZ,New Zealand,1002,Wanaka,1402690,Lake View,,3 Ardmore St,,,,Parking,-44.7|169.13,,9305,",
    ];

    #[tokio::test]
    async fn test_only_new_zealand_rows_are_imported() {
        let store = Arc::new(MemoryStore::new(10).with_table("Hotels", HOTEL_ID));
        let file = export(&ROWS);

        let report = importer(store.clone(), &file, false).run().await.unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.written, 2);
        assert_eq!(report.skipped, 1);

        let hotels = store.items("Hotels").await;
        assert_eq!(hotels.len(), 2);
        assert!(hotels
            .iter()
            .all(|h| h.get("countryName") == Some(&AttributeValue::S("New Zealand".to_string()))));
    }

    #[tokio::test]
    async fn test_missing_rating_is_stored_as_zero() {
        let store = Arc::new(MemoryStore::new(10).with_table("Hotels", HOTEL_ID));
        let file = export(&ROWS[2..]);

        importer(store.clone(), &file, false).run().await.unwrap();

        let hotels = store.items("Hotels").await;
        assert_eq!(hotels[0].get(HOTEL_RATING), Some(&AttributeValue::N("0".to_string())));
        assert_eq!(hotels[0].get("Map"), Some(&AttributeValue::S("-44.7|169.13".to_string())));
    }

    #[tokio::test]
    async fn test_fractional_values_stay_exact() {
        let store = Arc::new(MemoryStore::new(10).with_table("Hotels", HOTEL_ID));
        let file = export(&["NZ,New Zealand,1.3,Napier,1402700,Art Deco Inn,TwoStar,,,,,,,,,"]);

        importer(store.clone(), &file, false).run().await.unwrap();

        let hotels = store.items("Hotels").await;
        assert_eq!(hotels[0].get("cityCode"), Some(&AttributeValue::N("1.3".to_string())));
        assert_eq!(hotels[0].get("Address"), Some(&AttributeValue::N("0".to_string())));
    }

    #[tokio::test]
    async fn test_reimport_duplicates_hotels() {
        let store = Arc::new(MemoryStore::new(10).with_table("Hotels", HOTEL_ID));
        let file = export(&ROWS);

        importer(store.clone(), &file, false).run().await.unwrap();
        importer(store.clone(), &file, false).run().await.unwrap();

        assert_eq!(store.count("Hotels").await, 4);
    }

    #[tokio::test]
    async fn test_skip_existing_makes_reimport_idempotent() {
        let store = Arc::new(MemoryStore::new(1).with_table("Hotels", HOTEL_ID));
        let file = export(&ROWS);

        importer(store.clone(), &file, true).run().await.unwrap();
        let report = importer(store.clone(), &file, true).run().await.unwrap();

        assert_eq!(report.written, 0);
        assert_eq!(report.skipped, 3);
        assert_eq!(store.count("Hotels").await, 2);
    }

    #[tokio::test]
    async fn test_skip_existing_keeps_hotels_without_code() {
        let store = Arc::new(MemoryStore::new(10).with_table("Hotels", HOTEL_ID));
        let file = export(&[
            ROWS[0],
            "NZ,New Zealand,1003,Napier,,Art Deco Inn,TwoStar,,,,,,,,4110,",
            "NZ,New Zealand,1004,Nelson,,Harbour Lights,ThreeStar,,,,,,,,7010,",
        ]);

        let first = importer(store.clone(), &file, true).run().await.unwrap();
        assert_eq!(first.written, 3);

        let second = importer(store.clone(), &file, true).run().await.unwrap();
        assert_eq!(second.written, 2);
        assert_eq!(second.skipped, 1);
        assert_eq!(store.count("Hotels").await, 5);
    }

    #[tokio::test]
    async fn test_missing_column_aborts_before_writing() {
        let store = Arc::new(MemoryStore::new(10).with_table("Hotels", HOTEL_ID));
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "countyName, HotelName\nNew Zealand,Lodge").unwrap();

        let err = importer(store.clone(), &file, false).run().await.unwrap_err();

        assert!(err.to_string().contains("Missing expected column"));
        assert_eq!(store.count("Hotels").await, 0);
    }
}
