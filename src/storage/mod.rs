pub mod dynamodb;
pub mod memory;
pub mod models;

pub use dynamodb::DynamoDBStore;
pub use memory::MemoryStore;
pub use models::{HotelItem, HotelRef, RoomItem};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use thiserror::Error;

/// Ein DynamoDB Item (Attributname -> Wert)
pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("DynamoDB request failed: {0}")]
    Sdk(String),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Missing or invalid field: {0}")]
    MissingAttribute(String),

    #[error("Invalid value for field {field}: {value}")]
    InvalidAttribute { field: String, value: String },
}

/// Eine Scan-Seite plus Continuation Token
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<Item>,
    pub last_evaluated_key: Option<Item>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    pub name: String,
    pub hash_key: String,
}

/// Tabellen-Definition für create-tables (String Hash Keys, provisioned)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub name: String,
    pub hash_key: String,
    pub indexes: Vec<IndexSpec>,
    pub read_capacity: i64,
    pub write_capacity: i64,
}

/// Key-value table store used by all jobs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Scan one page, continuing after `start_key` when given.
    async fn scan_page(&self, table: &str, start_key: Option<Item>) -> Result<ScanPage, StoreError>;

    /// Insert or overwrite a whole item.
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError>;

    /// `SET name = value` on the item identified by `key`.
    async fn update_attribute(
        &self,
        table: &str,
        key: Item,
        name: &str,
        value: AttributeValue,
    ) -> Result<(), StoreError>;

    /// Returns false if the table already existed.
    async fn create_table(&self, spec: &TableSpec) -> Result<bool, StoreError>;
}

/// Seitenweiser Scan über eine komplette Tabelle
pub struct TableScan<'a> {
    store: &'a dyn TableStore,
    table: &'a str,
    start_key: Option<Item>,
    pages: usize,
    exhausted: bool,
}

impl<'a> TableScan<'a> {
    pub fn new(store: &'a dyn TableStore, table: &'a str) -> Self {
        Self {
            store,
            table,
            start_key: None,
            pages: 0,
            exhausted: false,
        }
    }

    /// Next page of items, `None` once the continuation token is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Item>>, StoreError> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self.store.scan_page(self.table, self.start_key.take()).await?;
        self.pages += 1;

        match page.last_evaluated_key {
            Some(key) if !key.is_empty() => self.start_key = Some(key),
            _ => self.exhausted = true,
        }

        tracing::debug!(
            table = self.table,
            page = self.pages,
            items = page.items.len(),
            more = !self.exhausted,
            "Scanned page"
        );

        Ok(Some(page.items))
    }

    pub fn pages(&self) -> usize {
        self.pages
    }
}
