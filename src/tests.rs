#[cfg(test)]
mod integration_tests {
    use crate::jobs::{self, PriceUpdater, RoomGenerator};
    use crate::storage::models::{get_optional_decimal, hotel_price, HOTEL_ID, PRICE, ROOM_TYPE_ID};
    use crate::storage::{DynamoDBStore, HotelRef, MemoryStore, RoomItem, TableStore};
    use crate::utils::Config;
    use rust_decimal::Decimal;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Arc;

    const EXPORT: &str = "countyCode, countyName, cityCode, cityName, HotelCode, HotelName, HotelRating, Address, Attractions, Description, FaxNumber, HotelFacilities, Map, PhoneNumber, PinCode, HotelWebsiteUrl\n\
        NZ,New Zealand,1001,Queenstown,1402689,Lakeside Lodge,FourStar,1 Lake Esplanade,Skyline,Quiet lodge,,Wifi,-45.03|168.66,64 3 441 0000,9300,http://lakeside.example\n\
        NZ,New Zealand,1002,Wanaka,1402690,Lake View,ThreeStar,3 Ardmore St,,,,Parking,-44.7|169.13,,9305,\n\
        AU,Australia,2001,Sydney,1300001,Harbour Inn,FiveStar,2 George St,,,,Pool,-33.86|151.2,,2000,\n\
        NZ,New Zealand,1003,Napier,1402691,Art Deco Inn,,,,,,,,,4110,\n";

    fn export_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXPORT.as_bytes()).unwrap();
        file
    }

    fn memory_store() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore::new(2)
                .with_table("Hotels", HOTEL_ID)
                .with_table("Rooms", ROOM_TYPE_ID),
        )
    }

    fn config_for(file: &tempfile::NamedTempFile) -> Config {
        let mut config = Config::default();
        config.import.file = file.path().to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_seed_pipeline() {
        let file = export_file();
        let store = memory_store();
        let config = config_for(&file);

        let reports = jobs::seed(store.clone(), &config).await.unwrap();

        let written: Vec<(&str, u64)> = reports.iter().map(|r| (r.job, r.written)).collect();
        assert_eq!(written, vec![("import", 3), ("price", 3), ("rooms", 9)]);

        let prices: HashMap<String, Decimal> = store
            .items("Hotels")
            .await
            .iter()
            .map(|item| {
                let hotel = HotelRef::from_item(item).unwrap();
                (hotel.hotel_name.unwrap(), hotel_price(item).unwrap().unwrap())
            })
            .collect();
        assert_eq!(prices["Lakeside Lodge"], Decimal::from(399));
        assert_eq!(prices["Lake View"], Decimal::from(299));
        assert_eq!(prices["Art Deco Inn"], Decimal::from(99));

        // Jedes Zimmer referenziert ein Hotel mit Preis
        let hotel_ids: Vec<String> = store
            .items("Hotels")
            .await
            .iter()
            .filter(|item| get_optional_decimal(item, PRICE).unwrap().is_some())
            .map(|item| HotelRef::from_item(item).unwrap().hotel_id)
            .collect();
        for item in store.items("Rooms").await {
            let room = RoomItem::from_item(&item).unwrap();
            assert!(hotel_ids.contains(&room.hotel_id));
        }
    }

    #[tokio::test]
    async fn test_rooms_before_price_skips_unpriced_hotels() {
        let file = export_file();
        let store = memory_store();
        let config = config_for(&file);

        jobs::HotelImporter::new(store.clone(), &config.store, &config.import)
            .run()
            .await
            .unwrap();
        let report = RoomGenerator::new(store.clone(), &config.store, &config.rooms)
            .run()
            .await
            .unwrap();

        assert_eq!(report.skipped, 3);
        assert_eq!(store.count("Rooms").await, 0);

        PriceUpdater::new(store.clone(), &config.store, &config.pricing)
            .run()
            .await
            .unwrap();
        let report = RoomGenerator::new(store.clone(), &config.store, &config.rooms)
            .run()
            .await
            .unwrap();

        assert_eq!(report.written, 9);
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() {
        let store = MemoryStore::new(10);
        let config = Config::default();

        let first = jobs::create_tables(&store, &config).await.unwrap();
        let second = jobs::create_tables(&store, &config).await.unwrap();

        assert_eq!(first.written, 2);
        assert_eq!(second.written, 0);
        assert_eq!(second.skipped, 2);
    }

    #[tokio::test]
    #[ignore] // Run mit: cargo test -- --ignored (DynamoDB Local auf localhost:8000)
    async fn test_dynamodb_local_seed() {
        let file = export_file();
        let mut config = config_for(&file);
        config.store.hotels_table = format!("Hotels-{}", uuid::Uuid::new_v4());
        config.store.rooms_table = format!("Rooms-{}", uuid::Uuid::new_v4());

        let store: Arc<dyn TableStore> =
            Arc::new(DynamoDBStore::connect(&config.store).await.unwrap());

        match jobs::create_tables(store.as_ref(), &config).await {
            Ok(report) => println!("✓ Tables created: {}", report.written),
            Err(e) => {
                println!("✗ DynamoDB Local not reachable: {:#}", e);
                return;
            }
        }

        let reports = jobs::seed(store, &config).await.unwrap();
        assert_eq!(reports[2].written, 9);
    }
}
