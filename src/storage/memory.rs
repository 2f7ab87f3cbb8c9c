use crate::storage::{Item, ScanPage, StoreError, TableSpec, TableStore};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use tokio::sync::Mutex;

/// In-memory table store with DynamoDB-like paging
pub struct MemoryStore {
    tables: Mutex<HashMap<String, MemoryTable>>,
    page_size: usize,
}

struct MemoryTable {
    hash_key: String,
    items: BTreeMap<String, Item>,
}

impl MemoryTable {
    fn key_of(&self, item: &Item) -> Result<String, StoreError> {
        item.get(&self.hash_key)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| StoreError::MissingAttribute(self.hash_key.clone()))
    }
}

impl MemoryStore {
    /// `page_size` items per scan page (minimum 1)
    pub fn new(page_size: usize) -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            page_size: page_size.max(1),
        }
    }

    pub fn with_table(mut self, name: &str, hash_key: &str) -> Self {
        self.tables.get_mut().insert(
            name.to_string(),
            MemoryTable {
                hash_key: hash_key.to_string(),
                items: BTreeMap::new(),
            },
        );
        self
    }

    /// Alle Items einer Tabelle in Key-Reihenfolge
    pub async fn items(&self, table: &str) -> Vec<Item> {
        let tables = self.tables.lock().await;
        tables
            .get(table)
            .map(|t| t.items.values().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn count(&self, table: &str) -> usize {
        let tables = self.tables.lock().await;
        tables.get(table).map(|t| t.items.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn scan_page(&self, table: &str, start_key: Option<Item>) -> Result<ScanPage, StoreError> {
        let tables = self.tables.lock().await;
        let mem = tables
            .get(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        let lower = match &start_key {
            Some(key) => Bound::Excluded(mem.key_of(key)?),
            None => Bound::Unbounded,
        };

        let mut remaining = mem.items.range((lower, Bound::Unbounded));
        let items: Vec<Item> = remaining
            .by_ref()
            .take(self.page_size)
            .map(|(_, item)| item.clone())
            .collect();

        let last_evaluated_key = match (remaining.next(), items.last()) {
            (Some(_), Some(last)) => {
                let key = mem.key_of(last)?;
                Some(HashMap::from([(mem.hash_key.clone(), AttributeValue::S(key))]))
            }
            _ => None,
        };

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }

    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let mem = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        let key = mem.key_of(&item)?;
        mem.items.insert(key, item);
        Ok(())
    }

    async fn update_attribute(
        &self,
        table: &str,
        key: Item,
        name: &str,
        value: AttributeValue,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let mem = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;

        // update_item legt fehlende Items an, wie DynamoDB
        let id = mem.key_of(&key)?;
        mem.items
            .entry(id)
            .or_insert(key)
            .insert(name.to_string(), value);
        Ok(())
    }

    async fn create_table(&self, spec: &TableSpec) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;
        if tables.contains_key(&spec.name) {
            return Ok(false);
        }

        tables.insert(
            spec.name.clone(),
            MemoryTable {
                hash_key: spec.hash_key.clone(),
                items: BTreeMap::new(),
            },
        );
        Ok(true)
    }
}
