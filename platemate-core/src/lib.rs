pub mod config;
pub mod dietary;
pub mod error;
pub mod export;
pub mod filter;
pub mod fuzzy;
pub mod generator;
pub mod grocery;
pub mod ingredient_categorizer;
pub mod instructions;
pub mod meal_plan;
pub mod pantry;
pub mod patterns;
pub mod ratings;
pub mod reference_data;
pub mod snapshot;
pub mod store;
pub mod subscription;
pub mod suggestions;
pub mod types;
pub mod user_data;

pub use config::{ConfigError, PlannerConfig};
pub use error::{InputError, SnapshotError, StoreError};
pub use generator::{
    generate_recipes, generate_recipes_with_stats, GenerationStats, DEFAULT_RECIPE_COUNT,
    MAX_ATTEMPTS_PER_SLOT,
};
pub use grocery::{aggregate, GroceryItem, GroceryList};
pub use ingredient_categorizer::{categorize, GroceryCategory};
pub use meal_plan::{Day, DayMeals, MealPlan, MealSlot};
pub use pantry::parse_pantry;
pub use ratings::{enrich_with_ratings, RatedRecipe, Rating};
pub use store::{Collection, FileStore, ListQuery, MemoryStore, Record, RecordStore};
pub use subscription::{Plan, PlanLimits, Subscription, UsageKind};
pub use types::{Cuisine, DietaryTag, IngredientWithQuantity, NutritionProfile, QuantitySpec, Recipe};
pub use user_data::{Preferences, UserData};
