//! Per-user persistence on top of a [`RecordStore`].
//!
//! Loads never fail: a store error is logged and the caller gets an empty or
//! default value, so a flaky backend degrades features instead of breaking
//! them. Saves report errors to the caller.

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::meal_plan::{Day, MealPlan, MealSlot};
use crate::ratings::Rating;
use crate::snapshot::{decode_recipe, encode_recipe};
use crate::store::{Collection, ListQuery, Record, RecordStore, SortOrder, TimestampField};
use crate::subscription::{Plan, Subscription, SubscriptionStatus, UsageKind};
use crate::types::{DietaryTag, Recipe};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteData {
    recipe_id: Uuid,
    recipe_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealPlanData {
    day: Day,
    meal_slot: MealSlot,
    recipe_id: Uuid,
    recipe_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubscriptionData {
    plan: Plan,
    status: SubscriptionStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageData {
    usage_type: UsageKind,
    usage_count: u32,
    week_start: NaiveDate,
}

/// Saved filter choices and ingredient history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub dietary_filters: Vec<DietaryTag>,
    #[serde(default)]
    pub recent_ingredients: Vec<String>,
}

/// One user's view of the record store.
#[derive(Debug, Clone)]
pub struct UserData {
    store: Arc<dyn RecordStore>,
    user_id: String,
}

fn to_data<T: Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_data<T: DeserializeOwned>(record: &Record) -> Result<T, StoreError> {
    serde_json::from_value(record.data.clone())
        .map_err(|e| StoreError::Serialization(format!("{}: {}", record.id, e)))
}

impl UserData {
    pub fn new(store: Arc<dyn RecordStore>, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn mine(&self) -> ListQuery {
        ListQuery::new().owner(self.user_id.clone())
    }

    /// Delete every record this user owns in `collection`.
    async fn clear_collection(&self, collection: Collection) -> Result<(), StoreError> {
        for record in self.store.list(collection, &self.mine()).await? {
            self.store.delete(collection, &record.id).await?;
        }
        Ok(())
    }

    // Favorites

    /// Favorites in the order they were saved. `save_favorites` replaces the
    /// whole list, so callers control the order by the slice they pass.
    pub async fn load_favorites(&self) -> Vec<Recipe> {
        let query = self
            .mine()
            .order_by(TimestampField::CreatedAt, SortOrder::Asc);
        let records = match self.store.list(Collection::Favorites, &query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(user = %self.user_id, error = %e, "Failed to load favorites");
                return Vec::new();
            }
        };

        records
            .iter()
            .filter_map(|record| {
                let decoded = from_data::<FavoriteData>(record)
                    .and_then(|data| decode_recipe(&data.recipe_data).map_err(StoreError::from));
                match decoded {
                    Ok(recipe) => Some(recipe),
                    Err(e) => {
                        tracing::warn!(record = %record.id, error = %e, "Skipping unreadable favorite");
                        None
                    }
                }
            })
            .collect()
    }

    /// Replace the stored favorites with `favorites`, keeping their order.
    pub async fn save_favorites(&self, favorites: &[Recipe]) -> Result<(), StoreError> {
        self.clear_collection(Collection::Favorites).await?;

        let mut seen = HashSet::new();
        for recipe in favorites {
            if !seen.insert(recipe.id) {
                continue;
            }
            let data = to_data(&FavoriteData {
                recipe_id: recipe.id,
                recipe_data: encode_recipe(recipe)?,
            })?;
            let id = format!("fav_{}_{}", self.user_id, recipe.id);
            self.store
                .create(Collection::Favorites, Record::new(id, self.user_id.clone(), data))
                .await?;
        }
        Ok(())
    }

    // Meal plan

    pub async fn load_meal_plan(&self) -> MealPlan {
        let records = match self.store.list(Collection::MealPlans, &self.mine()).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(user = %self.user_id, error = %e, "Failed to load meal plan");
                return MealPlan::new();
            }
        };

        let mut plan = MealPlan::new();
        for record in &records {
            let decoded = from_data::<MealPlanData>(record).and_then(|data| {
                let recipe = decode_recipe(&data.recipe_data)?;
                Ok((data.day, data.meal_slot, recipe))
            });
            match decoded {
                Ok((day, slot, recipe)) => {
                    plan.assign(day, slot, recipe);
                }
                Err(e) => {
                    tracing::warn!(record = %record.id, error = %e, "Skipping unreadable meal plan entry");
                }
            }
        }
        plan
    }

    /// Replace the stored plan with `plan`.
    pub async fn save_meal_plan(&self, plan: &MealPlan) -> Result<(), StoreError> {
        self.clear_collection(Collection::MealPlans).await?;

        for (day, slot, recipe) in plan.iter() {
            let data = to_data(&MealPlanData {
                day,
                meal_slot: slot,
                recipe_id: recipe.id,
                recipe_data: encode_recipe(recipe)?,
            })?;
            let id = format!("plan_{}_{}_{}", self.user_id, day, slot.number());
            self.store
                .create(Collection::MealPlans, Record::new(id, self.user_id.clone(), data))
                .await?;
        }
        Ok(())
    }

    // Preferences

    async fn preferences_record(&self) -> Result<Option<Record>, StoreError> {
        let query = self
            .mine()
            .order_by(TimestampField::UpdatedAt, SortOrder::Desc)
            .limit(1);
        Ok(self
            .store
            .list(Collection::Preferences, &query)
            .await?
            .into_iter()
            .next())
    }

    /// The stored preferences, or defaults when none are saved yet.
    async fn stored_preferences(&self) -> Result<Preferences, StoreError> {
        match self.preferences_record().await? {
            Some(record) => from_data::<Preferences>(&record),
            None => Ok(Preferences::default()),
        }
    }

    pub async fn load_preferences(&self) -> Preferences {
        match self.stored_preferences().await {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::error!(user = %self.user_id, error = %e, "Failed to load preferences");
                Preferences::default()
            }
        }
    }

    pub async fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        let data = to_data(preferences)?;
        match self.preferences_record().await? {
            Some(existing) => {
                self.store
                    .update(Collection::Preferences, &existing.id, data)
                    .await?;
            }
            None => {
                let id = format!("pref_{}", self.user_id);
                self.store
                    .create(Collection::Preferences, Record::new(id, self.user_id.clone(), data))
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn load_dietary_preferences(&self) -> Vec<DietaryTag> {
        self.load_preferences().await.dietary_filters
    }

    pub async fn save_dietary_preferences(&self, filters: &[DietaryTag]) -> Result<(), StoreError> {
        let mut preferences = self.stored_preferences().await?;
        preferences.dietary_filters = filters.to_vec();
        self.save_preferences(&preferences).await
    }

    pub async fn load_recent_ingredients(&self) -> Vec<String> {
        self.load_preferences().await.recent_ingredients
    }

    pub async fn save_recent_ingredients(&self, recent: &[String]) -> Result<(), StoreError> {
        let mut preferences = self.stored_preferences().await?;
        preferences.recent_ingredients = recent.to_vec();
        self.save_preferences(&preferences).await
    }

    // Subscription

    fn subscription_from(&self, record: &Record) -> Result<Subscription, StoreError> {
        let data: SubscriptionData = from_data(record)?;
        Ok(Subscription {
            id: record.id.clone(),
            user_id: record.owner_id.clone(),
            plan: data.plan,
            status: data.status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    async fn try_load_subscription(&self) -> Result<Subscription, StoreError> {
        let query = self
            .mine()
            .order_by(TimestampField::CreatedAt, SortOrder::Desc)
            .limit(1);
        if let Some(record) = self
            .store
            .list(Collection::Subscriptions, &query)
            .await?
            .into_iter()
            .next()
        {
            return self.subscription_from(&record);
        }

        let data = to_data(&SubscriptionData {
            plan: Plan::Free,
            status: SubscriptionStatus::Active,
        })?;
        let id = format!("sub_{}", self.user_id);
        let record = self
            .store
            .create(Collection::Subscriptions, Record::new(id, self.user_id.clone(), data))
            .await?;
        tracing::info!(user = %self.user_id, "Created free subscription");
        self.subscription_from(&record)
    }

    /// The user's current subscription.
    ///
    /// Creates a free subscription on first use. If the store fails, returns
    /// an unsaved free subscription.
    pub async fn load_subscription(&self) -> Subscription {
        match self.try_load_subscription().await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::error!(
                    user = %self.user_id,
                    error = %e,
                    "Failed to load subscription, using free fallback"
                );
                Subscription::free(
                    format!("sub_{}_fallback", self.user_id),
                    self.user_id.clone(),
                    Utc::now(),
                )
            }
        }
    }

    /// Move the user's subscription to the Pro plan.
    pub async fn upgrade_to_pro(&self) -> Result<Subscription, StoreError> {
        let current = self.try_load_subscription().await?;
        let data = to_data(&SubscriptionData {
            plan: Plan::Pro,
            status: current.status,
        })?;
        let record = self
            .store
            .update(Collection::Subscriptions, &current.id, data)
            .await?;
        self.subscription_from(&record)
    }

    // Usage

    async fn usage_record(&self, kind: UsageKind, week: NaiveDate) -> Result<Option<Record>, StoreError> {
        let query = self
            .mine()
            .where_eq("usageType", kind.as_str())
            .where_eq("weekStart", week.to_string())
            .limit(1);
        Ok(self.store.list(Collection::Usage, &query).await?.into_iter().next())
    }

    /// Counts per metered action for the week starting `week`.
    pub async fn load_usage(&self, week: NaiveDate) -> HashMap<UsageKind, u32> {
        let query = self.mine().where_eq("weekStart", week.to_string());
        let records = match self.store.list(Collection::Usage, &query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(user = %self.user_id, error = %e, "Failed to load usage");
                return HashMap::new();
            }
        };

        let mut usage = HashMap::new();
        for record in &records {
            match from_data::<UsageData>(record) {
                Ok(data) => {
                    usage.insert(data.usage_type, data.usage_count);
                }
                Err(e) => tracing::warn!(record = %record.id, error = %e, "Skipping unreadable usage"),
            }
        }
        usage
    }

    /// Add `increment` to this week's count for `kind`, returning the new count.
    pub async fn record_usage(
        &self,
        kind: UsageKind,
        week: NaiveDate,
        increment: u32,
    ) -> Result<u32, StoreError> {
        match self.usage_record(kind, week).await? {
            Some(existing) => {
                let current: UsageData = from_data(&existing)?;
                let count = current.usage_count.saturating_add(increment);
                let data = to_data(&UsageData {
                    usage_count: count,
                    ..current
                })?;
                self.store.update(Collection::Usage, &existing.id, data).await?;
                Ok(count)
            }
            None => {
                let data = to_data(&UsageData {
                    usage_type: kind,
                    usage_count: increment,
                    week_start: week,
                })?;
                let id = format!("usage_{}_{}_{}", self.user_id, kind, week);
                self.store
                    .create(Collection::Usage, Record::new(id, self.user_id.clone(), data))
                    .await?;
                Ok(increment)
            }
        }
    }

    // Ratings

    /// Store the user's rating, replacing any earlier rating of the same recipe.
    pub async fn submit_rating(&self, rating: &Rating) -> Result<(), StoreError> {
        let data = to_data(rating)?;
        let query = self
            .mine()
            .where_eq("recipeId", rating.recipe_id.to_string())
            .limit(1);
        match self.store.list(Collection::Ratings, &query).await?.into_iter().next() {
            Some(existing) => {
                self.store.update(Collection::Ratings, &existing.id, data).await?;
            }
            None => {
                self.store
                    .create(
                        Collection::Ratings,
                        Record::new(rating.id.clone(), self.user_id.clone(), data),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Every user's ratings for each recipe, newest first.
    pub async fn load_ratings(&self, recipe_ids: &[Uuid]) -> HashMap<Uuid, Vec<Rating>> {
        let mut ratings = HashMap::new();
        for recipe_id in recipe_ids {
            let query = ListQuery::new().where_eq("recipeId", recipe_id.to_string());
            match self.store.list(Collection::Ratings, &query).await {
                Ok(records) => {
                    let mut parsed: Vec<Rating> = records
                        .iter()
                        .filter_map(|record| match from_data::<Rating>(record) {
                            Ok(rating) => Some(rating),
                            Err(e) => {
                                tracing::warn!(record = %record.id, error = %e, "Skipping unreadable rating");
                                None
                            }
                        })
                        .collect();
                    parsed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    ratings.insert(*recipe_id, parsed);
                }
                Err(e) => {
                    tracing::error!(recipe = %recipe_id, error = %e, "Failed to load ratings");
                }
            }
        }
        ratings
    }
}
