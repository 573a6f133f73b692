//! On-disk record store.
//!
//! Each collection is one pretty-printed JSON array under the store
//! directory, e.g. `<dir>/mealPlans.json`. Writes go through a temporary file
//! and a rename so a crash never leaves a half-written collection.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use super::{insert_record, remove_record, update_record, Collection, ListQuery, Record, RecordStore};
use crate::error::StoreError;

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.as_str()))
    }

    async fn load(&self, collection: Collection) -> Result<Vec<Record>, StoreError> {
        let path = self.collection_path(collection);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))
    }

    async fn save(&self, collection: Collection, records: &[Record]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", self.dir.display(), e)))?;

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(
            collection = collection.as_str(),
            records = records.len(),
            "Saved collection"
        );
        Ok(())
    }

    /// Load a collection, apply `change`, and write it back.
    async fn modify<T>(
        &self,
        collection: Collection,
        change: impl FnOnce(&mut Vec<Record>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load(collection).await?;
        let result = change(&mut records)?;
        self.save(collection, &records).await?;
        Ok(result)
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn create(&self, collection: Collection, record: Record) -> Result<Record, StoreError> {
        self.modify(collection, |records| insert_record(records, collection, record))
            .await
    }

    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Record>, StoreError> {
        let records = self.load(collection).await?;
        Ok(query.apply(&records))
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: serde_json::Value,
    ) -> Result<Record, StoreError> {
        self.modify(collection, |records| update_record(records, collection, id, data))
            .await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        self.modify(collection, |records| remove_record(records, collection, id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SortOrder, TimestampField};
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileStore::new(temp_dir.path());
            store
                .create(Collection::MealPlans, Record::new("plan_u1_Monday_1", "u1", json!({"day": "Monday"})))
                .await
                .unwrap();
        }

        let store = FileStore::new(temp_dir.path());
        let records = store
            .list(Collection::MealPlans, &ListQuery::new().owner("u1"))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data["day"], "Monday");
        assert!(temp_dir.path().join("mealPlans.json").exists());
    }

    #[tokio::test]
    async fn test_missing_directory_lists_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("not-yet"));
        let records = store.list(Collection::Favorites, &ListQuery::new()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_update_delete_and_errors() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store
            .create(Collection::Usage, Record::new("u", "u1", json!({"count": 1})))
            .await
            .unwrap();
        let err = store
            .create(Collection::Usage, Record::new("u", "u1", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        store.update(Collection::Usage, "u", json!({"count": 2})).await.unwrap();
        let records = store
            .list(
                Collection::Usage,
                &ListQuery::new().order_by(TimestampField::UpdatedAt, SortOrder::Desc),
            )
            .await
            .unwrap();
        assert_eq!(records[0].data["count"], 2);

        store.delete(Collection::Usage, "u").await.unwrap();
        let err = store.delete(Collection::Usage, "u").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_collection_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("ratings.json"), "not json").unwrap();
        let store = FileStore::new(temp_dir.path());
        let err = store.list(Collection::Ratings, &ListQuery::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_all_kept() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(temp_dir.path()));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(
                            Collection::Favorites,
                            Record::new(format!("fav_u1_{}", i), "u1", json!({ "n": i })),
                        )
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.list(Collection::Favorites, &ListQuery::new()).await.unwrap();
        assert_eq!(records.len(), 16);
        assert!(!temp_dir.path().join("favorites.json.tmp").exists());
    }
}
