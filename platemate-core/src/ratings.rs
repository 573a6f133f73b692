//! User ratings and the per-recipe summaries shown beside each recipe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::InputError;
use crate::types::Recipe;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: String,
    pub user_id: String,
    pub recipe_id: Uuid,
    pub stars: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// Build a rating; one user has at most one rating per recipe, so the id
    /// is derived from both.
    pub fn new(
        user_id: &str,
        recipe_id: Uuid,
        stars: u8,
        review: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InputError> {
        if !(MIN_STARS..=MAX_STARS).contains(&stars) {
            return Err(InputError::InvalidArgument(format!(
                "rating must be between {} and {} stars, got {}",
                MIN_STARS, MAX_STARS, stars
            )));
        }
        let review = review
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(Self {
            id: rating_id(user_id, recipe_id),
            user_id: user_id.to_string(),
            recipe_id,
            stars,
            review,
            created_at,
        })
    }
}

pub fn rating_id(user_id: &str, recipe_id: Uuid) -> String {
    format!("rating_{}_{}", user_id, recipe_id)
}

/// A recipe together with its rating summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    pub total_ratings: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<Rating>,
}

impl RatedRecipe {
    pub fn unrated(recipe: Recipe) -> Self {
        Self {
            recipe,
            average_rating: None,
            total_ratings: 0,
            user_rating: None,
        }
    }
}

/// Attach rating summaries to each recipe.
///
/// `ratings` maps recipe ids to every rating for that recipe. The average is
/// absent for recipes nobody has rated.
pub fn enrich_with_ratings(
    recipes: Vec<Recipe>,
    ratings: &HashMap<Uuid, Vec<Rating>>,
    current_user: Option<&str>,
) -> Vec<RatedRecipe> {
    recipes
        .into_iter()
        .map(|recipe| {
            let recipe_ratings = ratings.get(&recipe.id).map(Vec::as_slice).unwrap_or(&[]);
            let total_ratings = recipe_ratings.len();
            let average_rating = (total_ratings > 0).then(|| {
                let sum: u32 = recipe_ratings.iter().map(|r| u32::from(r.stars)).sum();
                f64::from(sum) / total_ratings as f64
            });
            let user_rating = current_user.and_then(|user| {
                recipe_ratings.iter().find(|r| r.user_id == user).cloned()
            });

            RatedRecipe {
                recipe,
                average_rating,
                total_ratings,
                user_rating,
            }
        })
        .collect()
}
