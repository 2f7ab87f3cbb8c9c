use crate::jobs::pricing::RatingTable;
use crate::jobs::JobReport;
use crate::storage::models::{hotel_key, HotelRef, PRICE};
use crate::storage::{TableScan, TableStore};
use crate::utils::config::{PricingConfig, StoreConfig};
use anyhow::{Context, Result};
use aws_sdk_dynamodb::types::AttributeValue;
use std::sync::Arc;
use std::time::Instant;

/// Berechne Hotelpreise aus dem Star-Rating neu
pub struct PriceUpdater {
    store: Arc<dyn TableStore>,
    hotels_table: String,
    ratings: RatingTable,
}

impl PriceUpdater {
    pub fn new(store: Arc<dyn TableStore>, store_config: &StoreConfig, config: &PricingConfig) -> Self {
        Self {
            store,
            hotels_table: store_config.hotels_table.clone(),
            ratings: RatingTable::new(&config.ratings),
        }
    }

    /// Scans every hotel page by page and sets `price` from `HotelRating`.
    /// Safe to rerun after a crash: the price only depends on the rating.
    pub async fn run(&self) -> Result<JobReport> {
        let started = Instant::now();
        let mut report = JobReport::new("price");
        let mut scan = TableScan::new(self.store.as_ref(), &self.hotels_table);

        while let Some(items) = scan.next_page().await? {
            for item in &items {
                report.scanned += 1;

                let hotel = HotelRef::from_item(item)?;
                let price = self.ratings.price_for(hotel.rating.as_deref());

                self.store
                    .update_attribute(
                        &self.hotels_table,
                        hotel_key(&hotel.hotel_id),
                        PRICE,
                        AttributeValue::N(price.to_string()),
                    )
                    .await
                    .with_context(|| format!("Failed to update price of hotel {}", hotel.hotel_id))?;
                report.written += 1;

                tracing::info!(
                    hotel_id = %hotel.hotel_id,
                    hotel_name = hotel.hotel_name.as_deref().unwrap_or(""),
                    rating = hotel.rating.as_deref().unwrap_or(""),
                    price,
                    "Updated hotel price"
                );
            }
        }

        Ok(report.finish(started))
    }
}
