use crate::sheet::{CellValue, SheetError, SheetRow};
use crate::storage::{IndexSpec, Item, StoreError, TableSpec};
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

pub const HOTEL_ID: &str = "hotelId";
pub const HOTEL_CODE: &str = "hotelCode";
pub const HOTEL_NAME: &str = "HotelName";
pub const HOTEL_RATING: &str = "HotelRating";
pub const PRICE: &str = "price";
pub const ROOM_TYPE_ID: &str = "roomTypeId";
pub const HOTEL_ID_INDEX: &str = "HotelIdIndex";

/// Country column of the hotel export
pub const COUNTRY_NAME_COLUMN: &str = "countyName";

/// Alle Spalten, die der Import aus dem CSV Export liest
pub const HOTEL_COLUMNS: [&str; 16] = [
    "HotelCode",
    "countyCode",
    "countyName",
    "cityCode",
    "cityName",
    "HotelName",
    "HotelRating",
    "Address",
    "Attractions",
    "Description",
    "FaxNumber",
    "HotelFacilities",
    "Map",
    "PhoneNumber",
    "PinCode",
    "HotelWebsiteUrl",
];

impl From<&CellValue> for AttributeValue {
    fn from(value: &CellValue) -> Self {
        match value {
            CellValue::Text(text) => AttributeValue::S(text.clone()),
            CellValue::Integer(number) => AttributeValue::N(number.to_string()),
            CellValue::Decimal(number) => AttributeValue::N(number.to_string()),
        }
    }
}

/// DynamoDB Hotel Item, wie es der Import schreibt
#[derive(Debug, Clone, PartialEq)]
pub struct HotelItem {
    pub hotel_id: String,
    pub hotel_code: CellValue,
    pub country_code: CellValue,
    pub country_name: CellValue,
    pub city_code: CellValue,
    pub city_name: CellValue,
    pub hotel_name: CellValue,
    pub hotel_rating: CellValue,
    pub address: CellValue,
    pub attractions: CellValue,
    pub description: CellValue,
    pub fax_number: CellValue,
    pub hotel_facilities: CellValue,
    pub map: CellValue,
    pub phone_number: CellValue,
    pub pin_code: CellValue,
    pub hotel_website_url: CellValue,
    pub price: Option<i64>,
}

impl HotelItem {
    /// Mappe eine CSV-Zeile auf ein Hotel mit frischer ID
    pub fn from_row(row: &SheetRow<'_>) -> Result<Self, SheetError> {
        let cell = |column: &str| row.get(column).cloned();

        Ok(Self {
            hotel_id: Uuid::new_v4().to_string(),
            hotel_code: cell("HotelCode")?,
            country_code: cell("countyCode")?,
            country_name: cell("countyName")?,
            city_code: cell("cityCode")?,
            city_name: cell("cityName")?,
            hotel_name: cell("HotelName")?,
            hotel_rating: cell("HotelRating")?,
            address: cell("Address")?,
            attractions: cell("Attractions")?,
            description: cell("Description")?,
            fax_number: cell("FaxNumber")?,
            hotel_facilities: cell("HotelFacilities")?,
            map: cell("Map")?,
            phone_number: cell("PhoneNumber")?,
            pin_code: cell("PinCode")?,
            hotel_website_url: cell("HotelWebsiteUrl")?,
            price: None,
        })
    }

    pub fn to_item(&self) -> Item {
        let mut item = HashMap::new();

        item.insert(HOTEL_ID.to_string(), AttributeValue::S(self.hotel_id.clone()));
        item.insert(HOTEL_CODE.to_string(), (&self.hotel_code).into());
        item.insert("countryCode".to_string(), (&self.country_code).into());
        item.insert("countryName".to_string(), (&self.country_name).into());
        item.insert("cityCode".to_string(), (&self.city_code).into());
        item.insert("cityName".to_string(), (&self.city_name).into());
        item.insert(HOTEL_NAME.to_string(), (&self.hotel_name).into());
        item.insert(HOTEL_RATING.to_string(), (&self.hotel_rating).into());
        item.insert("Address".to_string(), (&self.address).into());
        item.insert("Attractions".to_string(), (&self.attractions).into());
        item.insert("Description".to_string(), (&self.description).into());
        item.insert("FaxNumber".to_string(), (&self.fax_number).into());
        item.insert("HotelFacilities".to_string(), (&self.hotel_facilities).into());
        item.insert("Map".to_string(), (&self.map).into());
        item.insert("PhoneNumber".to_string(), (&self.phone_number).into());
        item.insert("pinCode".to_string(), (&self.pin_code).into());
        item.insert("HotelWebsiteUrl".to_string(), (&self.hotel_website_url).into());

        if let Some(price) = self.price {
            item.insert(PRICE.to_string(), AttributeValue::N(price.to_string()));
        }

        item
    }
}

/// Felder eines gespeicherten Hotels, die Price- und Room-Job brauchen
///
/// `price` is not part of it: the price job overwrites whatever is stored,
/// only the room job reads it (see [`hotel_price`]).
#[derive(Debug, Clone, PartialEq)]
pub struct HotelRef {
    pub hotel_id: String,
    pub hotel_name: Option<String>,
    pub rating: Option<String>,
}

impl HotelRef {
    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        Ok(Self {
            hotel_id: get_string(item, HOTEL_ID)?,
            hotel_name: get_text(item, HOTEL_NAME),
            rating: get_optional_string(item, HOTEL_RATING),
        })
    }
}

/// Gespeicherter Hotelpreis; Fehler wenn vorhanden aber nicht numerisch
pub fn hotel_price(item: &Item) -> Result<Option<Decimal>, StoreError> {
    get_optional_decimal(item, PRICE)
}

pub fn hotel_key(hotel_id: &str) -> Item {
    HashMap::from([(HOTEL_ID.to_string(), AttributeValue::S(hotel_id.to_string()))])
}

/// DynamoDB Room Type Item
#[derive(Debug, Clone, PartialEq)]
pub struct RoomItem {
    pub room_type_id: String,
    pub hotel_id: String,
    pub room_type_name: String,
    pub price: Decimal,
    pub total: u32,
    pub available: u32,
    pub created_at: String, // RFC 3339, UTC
}

impl RoomItem {
    pub fn new(hotel_id: &str, room_type_name: &str, price: Decimal, total: u32, available: u32) -> Self {
        Self {
            room_type_id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            room_type_name: room_type_name.to_string(),
            price,
            total,
            available,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    pub fn to_item(&self) -> Item {
        let mut item = HashMap::new();

        item.insert(ROOM_TYPE_ID.to_string(), AttributeValue::S(self.room_type_id.clone()));
        item.insert(HOTEL_ID.to_string(), AttributeValue::S(self.hotel_id.clone()));
        item.insert(
            "roomTypeName".to_string(),
            AttributeValue::S(self.room_type_name.clone()),
        );
        item.insert(PRICE.to_string(), AttributeValue::N(self.price.to_string()));
        item.insert("total".to_string(), AttributeValue::N(self.total.to_string()));
        item.insert("available".to_string(), AttributeValue::N(self.available.to_string()));
        item.insert("createdAt".to_string(), AttributeValue::S(self.created_at.clone()));

        item
    }

    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        Ok(Self {
            room_type_id: get_string(item, ROOM_TYPE_ID)?,
            hotel_id: get_string(item, HOTEL_ID)?,
            room_type_name: get_string(item, "roomTypeName")?,
            price: get_optional_decimal(item, PRICE)?
                .ok_or_else(|| StoreError::MissingAttribute(PRICE.to_string()))?,
            total: get_count(item, "total")?,
            available: get_count(item, "available")?,
            created_at: get_string(item, "createdAt")?,
        })
    }
}

pub fn hotels_table(name: &str) -> TableSpec {
    TableSpec {
        name: name.to_string(),
        hash_key: HOTEL_ID.to_string(),
        indexes: Vec::new(),
        read_capacity: 5,
        write_capacity: 5,
    }
}

pub fn rooms_table(name: &str) -> TableSpec {
    TableSpec {
        name: name.to_string(),
        hash_key: ROOM_TYPE_ID.to_string(),
        indexes: vec![IndexSpec {
            name: HOTEL_ID_INDEX.to_string(),
            hash_key: HOTEL_ID.to_string(),
        }],
        read_capacity: 5,
        write_capacity: 5,
    }
}

pub fn get_string(item: &Item, key: &str) -> Result<String, StoreError> {
    get_optional_string(item, key).ok_or_else(|| StoreError::MissingAttribute(key.to_string()))
}

pub fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_s().ok()).cloned()
}

/// String oder Zahl als Text (z.B. numerische hotelCode Werte)
pub fn get_text(item: &Item, key: &str) -> Option<String> {
    match item.get(key)? {
        AttributeValue::S(text) | AttributeValue::N(text) => Some(text.clone()),
        _ => None,
    }
}

/// Reads an `N` (or numeric `S`) attribute as an exact decimal.
pub fn get_optional_decimal(item: &Item, key: &str) -> Result<Option<Decimal>, StoreError> {
    let raw = match item.get(key) {
        Some(AttributeValue::N(raw)) | Some(AttributeValue::S(raw)) => raw,
        Some(AttributeValue::Null(_)) | None => return Ok(None),
        Some(other) => {
            return Err(StoreError::InvalidAttribute {
                field: key.to_string(),
                value: format!("{:?}", other),
            })
        }
    };

    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .map(|value| Some(value.normalize()))
        .map_err(|_| StoreError::InvalidAttribute {
            field: key.to_string(),
            value: raw.clone(),
        })
}

fn get_count(item: &Item, key: &str) -> Result<u32, StoreError> {
    let raw = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| StoreError::MissingAttribute(key.to_string()))?;

    raw.parse().map_err(|_| StoreError::InvalidAttribute {
        field: key.to_string(),
        value: raw.clone(),
    })
}
