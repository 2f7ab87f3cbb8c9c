use crate::jobs::pricing::RoomType;
use crate::jobs::JobReport;
use crate::storage::models::{get_optional_string, hotel_price, HotelRef, RoomItem, HOTEL_ID};
use crate::storage::{TableScan, TableStore};
use crate::utils::config::{MissingPricePolicy, RoomsConfig, StoreConfig};
use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Generiere Room Types für jedes Hotel
pub struct RoomGenerator {
    store: Arc<dyn TableStore>,
    hotels_table: String,
    rooms_table: String,
    room_types: Vec<RoomType>,
    total: u32,
    available: u32,
    missing_price: MissingPricePolicy,
    skip_existing: bool,
}

impl RoomGenerator {
    pub fn new(store: Arc<dyn TableStore>, store_config: &StoreConfig, config: &RoomsConfig) -> Self {
        Self {
            store,
            hotels_table: store_config.hotels_table.clone(),
            rooms_table: store_config.rooms_table.clone(),
            room_types: config.types.clone(),
            total: config.total,
            available: config.available,
            missing_price: config.missing_price,
            skip_existing: config.skip_existing,
        }
    }

    /// Writes one room per configured type for every hotel, paging through
    /// the whole Hotels table. Without `skip_existing` a rerun duplicates
    /// all rooms.
    pub async fn run(&self) -> Result<JobReport> {
        let started = Instant::now();
        let mut report = JobReport::new("rooms");

        let existing = if self.skip_existing {
            self.hotels_with_rooms().await?
        } else {
            HashSet::new()
        };

        let mut scan = TableScan::new(self.store.as_ref(), &self.hotels_table);
        while let Some(items) = scan.next_page().await? {
            for item in &items {
                report.scanned += 1;
                let hotel = HotelRef::from_item(item)?;

                if existing.contains(&hotel.hotel_id) {
                    report.skipped += 1;
                    tracing::debug!(hotel_id = %hotel.hotel_id, "Hotel already has rooms");
                    continue;
                }

                let stored = hotel_price(item)
                    .with_context(|| format!("Invalid price on hotel {}", hotel.hotel_id))?;
                let Some(hotel_price) = self.resolve_price(&hotel.hotel_id, stored)? else {
                    report.skipped += 1;
                    continue;
                };

                // Alle Preise vorab, damit ein Overflow keine halben Zimmer hinterlässt
                let rooms = self
                    .room_types
                    .iter()
                    .map(|room_type| {
                        let price = room_type.price_for(hotel_price).ok_or_else(|| {
                            anyhow!(
                                "{} price overflows for hotel {} (hotel price {})",
                                room_type.name,
                                hotel.hotel_id,
                                hotel_price
                            )
                        })?;
                        Ok(RoomItem::new(&hotel.hotel_id, &room_type.name, price, self.total, self.available))
                    })
                    .collect::<Result<Vec<_>>>()?;

                for room in rooms {
                    self.store
                        .put_item(&self.rooms_table, room.to_item())
                        .await
                        .with_context(|| {
                            format!("Failed to store {} for hotel {}", room.room_type_name, hotel.hotel_id)
                        })?;
                    report.written += 1;

                    tracing::info!(
                        room_type_id = %room.room_type_id,
                        hotel_id = %hotel.hotel_id,
                        room_type = %room.room_type_name,
                        price = %room.price,
                        "Added room type"
                    );
                }
            }
        }

        Ok(report.finish(started))
    }

    fn resolve_price(&self, hotel_id: &str, stored: Option<Decimal>) -> Result<Option<Decimal>> {
        if let Some(price) = stored {
            return Ok(Some(price));
        }

        match self.missing_price {
            MissingPricePolicy::Skip => {
                tracing::warn!(hotel_id, "Hotel has no price, skipping rooms");
                Ok(None)
            }
            MissingPricePolicy::Zero => {
                tracing::warn!(hotel_id, "Hotel has no price, using 0");
                Ok(Some(Decimal::ZERO))
            }
            MissingPricePolicy::Fail => {
                bail!("Hotel {} has no price; run the price job first", hotel_id)
            }
        }
    }

    async fn hotels_with_rooms(&self) -> Result<HashSet<String>> {
        let mut hotels = HashSet::new();
        let mut scan = TableScan::new(self.store.as_ref(), &self.rooms_table);

        while let Some(items) = scan.next_page().await? {
            hotels.extend(items.iter().filter_map(|item| get_optional_string(item, HOTEL_ID)));
        }

        tracing::info!(hotels = hotels.len(), "Loaded hotels with existing rooms");
        Ok(hotels)
    }
}
