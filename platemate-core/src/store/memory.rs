//! In-memory record store for tests and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{insert_record, remove_record, update_record, Collection, ListQuery, Record, RecordStore};
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a collection.
    pub fn count(&self, collection: Collection) -> usize {
        let collections = self
            .collections
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        collections.get(&collection).map_or(0, Vec::len)
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Io("store lock poisoned".to_string())
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, collection: Collection, record: Record) -> Result<Record, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        insert_record(collections.entry(collection).or_default(), collection, record)
    }

    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Record>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections
            .get(&collection)
            .map(|records| query.apply(records))
            .unwrap_or_default())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: serde_json::Value,
    ) -> Result<Record, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        update_record(collections.entry(collection).or_default(), collection, id, data)
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        remove_record(collections.entry(collection).or_default(), collection, id)
    }
}
