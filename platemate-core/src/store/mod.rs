//! Record store abstraction for user-scoped data.
//!
//! Records live in named collections and carry an owner id, a JSON payload
//! and creation/update timestamps. Implementations must be thread-safe;
//! [`MemoryStore`] backs tests and [`FileStore`] keeps one JSON document per
//! collection on disk.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Favorites,
    MealPlans,
    Preferences,
    Ratings,
    Subscriptions,
    Usage,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Favorites,
        Collection::MealPlans,
        Collection::Preferences,
        Collection::Ratings,
        Collection::Subscriptions,
        Collection::Usage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Favorites => "favorites",
            Collection::MealPlans => "mealPlans",
            Collection::Preferences => "preferences",
            Collection::Ratings => "ratings",
            Collection::Subscriptions => "subscriptions",
            Collection::Usage => "usage",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub owner_id: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// A new record stamped with the current time.
    pub fn new(id: impl Into<String>, owner_id: impl Into<String>, data: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            owner_id: owner_id.into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn timestamp(&self, field: TimestampField) -> DateTime<Utc> {
        match field {
            TimestampField::CreatedAt => self.created_at,
            TimestampField::UpdatedAt => self.updated_at,
        }
    }

    /// A top-level field of the payload, if the payload is an object.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter, order and bound a `list` call.
///
/// Without an ordering, records come back in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    owner: Option<String>,
    equals: Vec<(String, serde_json::Value)>,
    order: Option<(TimestampField, SortOrder)>,
    limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner = Some(owner_id.into());
        self
    }

    /// Keep records whose payload field `field` equals `value`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.equals.push((field.into(), value.into()));
        self
    }

    pub fn order_by(mut self, field: TimestampField, order: SortOrder) -> Self {
        self.order = Some((field, order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if let Some(owner) = &self.owner {
            if &record.owner_id != owner {
                return false;
            }
        }
        self.equals
            .iter()
            .all(|(field, value)| record.field(field) == Some(value))
    }

    /// Run the query over records held in insertion order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut matched: Vec<Record> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        if let Some((field, order)) = self.order {
            // Stable sort keeps insertion order among equal timestamps.
            matched.sort_by(|a, b| {
                let ordering = a.timestamp(field).cmp(&b.timestamp(field));
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Persistence collaborator for favorites, plans, preferences and the rest.
#[async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Insert a record. Fails with `Conflict` if the id is taken.
    async fn create(&self, collection: Collection, record: Record) -> Result<Record, StoreError>;

    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<Record>, StoreError>;

    /// Replace a record's payload and bump its `updated_at`.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        data: serde_json::Value,
    ) -> Result<Record, StoreError>;

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;
}

// Shared bookkeeping for stores that hold a collection as an ordered Vec.

fn insert_record(
    records: &mut Vec<Record>,
    collection: Collection,
    record: Record,
) -> Result<Record, StoreError> {
    if records.iter().any(|existing| existing.id == record.id) {
        return Err(StoreError::Conflict {
            collection: collection.to_string(),
            id: record.id,
        });
    }
    records.push(record.clone());
    Ok(record)
}

fn update_record(
    records: &mut [Record],
    collection: Collection,
    id: &str,
    data: serde_json::Value,
) -> Result<Record, StoreError> {
    let record = records
        .iter_mut()
        .find(|record| record.id == id)
        .ok_or_else(|| not_found(collection, id))?;
    record.data = data;
    record.updated_at = Utc::now().max(record.updated_at);
    Ok(record.clone())
}

fn remove_record(records: &mut Vec<Record>, collection: Collection, id: &str) -> Result<(), StoreError> {
    let index = records
        .iter()
        .position(|record| record.id == id)
        .ok_or_else(|| not_found(collection, id))?;
    records.remove(index);
    Ok(())
}

fn not_found(collection: Collection, id: &str) -> StoreError {
    StoreError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn record(id: &str, owner: &str, data: serde_json::Value, day: u32) -> Record {
        let at = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
        Record {
            id: id.to_string(),
            owner_id: owner.to_string(),
            data,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_query_filters() {
        let records = vec![
            record("a", "u1", json!({"recipeId": "r1"}), 1),
            record("b", "u2", json!({"recipeId": "r1"}), 2),
            record("c", "u1", json!({"recipeId": "r2"}), 3),
        ];

        let ids = |q: &ListQuery| -> Vec<String> {
            q.apply(&records).into_iter().map(|r| r.id).collect()
        };

        assert_eq!(ids(&ListQuery::new()), vec!["a", "b", "c"]);
        assert_eq!(ids(&ListQuery::new().owner("u1")), vec!["a", "c"]);
        assert_eq!(ids(&ListQuery::new().where_eq("recipeId", "r1")), vec!["a", "b"]);
        assert_eq!(
            ids(&ListQuery::new().owner("u1").where_eq("recipeId", "r1")),
            vec!["a"]
        );
        assert!(ids(&ListQuery::new().where_eq("missing", 1)).is_empty());
    }

    #[test]
    fn test_query_order_and_limit() {
        let records = vec![
            record("old", "u1", json!({}), 1),
            record("new", "u1", json!({}), 9),
            record("mid", "u1", json!({}), 5),
        ];
        let newest: Vec<String> = ListQuery::new()
            .order_by(TimestampField::CreatedAt, SortOrder::Desc)
            .limit(2)
            .apply(&records)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(newest, vec!["new", "mid"]);

        let oldest = ListQuery::new()
            .order_by(TimestampField::UpdatedAt, SortOrder::Asc)
            .limit(1)
            .apply(&records);
        assert_eq!(oldest[0].id, "old");
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::MealPlans.as_str(), "mealPlans");
        assert_eq!(
            serde_json::to_string(&Collection::MealPlans).unwrap(),
            "\"mealPlans\""
        );
    }
}
