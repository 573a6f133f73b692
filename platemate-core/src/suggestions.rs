//! Personalised and trending recipe suggestions.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::{generate_recipes, DEFAULT_RECIPE_COUNT};
use crate::ratings::RatedRecipe;
use crate::types::{Cuisine, DietaryTag, Recipe};

pub const MAX_SUGGESTIONS: usize = 4;
pub const MAX_TRENDING: usize = 6;

const RECENT_INGREDIENT_WINDOW: usize = 5;
const FAVORITE_INGREDIENT_WINDOW: usize = 8;
const PER_SOURCE_SUGGESTIONS: usize = 2;
const POPULAR_SUGGESTIONS: usize = 3;

/// Starter pantries for users with no history.
pub const POPULAR_COMBINATIONS: &[&[&str]] = &[
    &["chicken", "broccoli", "rice"],
    &["salmon", "asparagus", "quinoa"],
    &["beef", "carrots", "potatoes"],
    &["tofu", "spinach", "noodles"],
];

/// A trending ingredient combination with its community numbers.
#[derive(Debug, Clone, Copy)]
pub struct TrendingCombination {
    pub ingredients: &'static [&'static str],
    pub rating: f64,
    pub favorites: u32,
}

/// Ordered by favorites, most first.
pub const TRENDING_COMBINATIONS: &[TrendingCombination] = &[
    TrendingCombination { ingredients: &["chicken", "garlic", "herbs"], rating: 4.8, favorites: 156 },
    TrendingCombination { ingredients: &["salmon", "lemon", "asparagus"], rating: 4.7, favorites: 142 },
    TrendingCombination { ingredients: &["pasta", "tomatoes", "basil"], rating: 4.6, favorites: 138 },
    TrendingCombination { ingredients: &["beef", "mushrooms", "onions"], rating: 4.9, favorites: 134 },
    TrendingCombination { ingredients: &["tofu", "soy sauce", "broccoli"], rating: 4.5, favorites: 128 },
    TrendingCombination { ingredients: &["eggs", "spinach", "cheese"], rating: 4.7, favorites: 125 },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingRecipe {
    #[serde(flatten)]
    pub rated: RatedRecipe,
    pub favorites: u32,
}

/// Suggest recipes based on what the user cooked and saved before.
///
/// Draws up to two recipes from recent ingredients and up to two from the
/// ingredients of favorite recipes. Users with neither get recipes from a
/// random popular combination instead. When dietary filters are set, a
/// suggestion is kept if it carries any one of them.
pub fn smart_suggestions<R: Rng + ?Sized>(
    recent: &[String],
    favorites: &[Recipe],
    cuisine_filter: &[Cuisine],
    dietary_filter: &[DietaryTag],
    rng: &mut R,
) -> Vec<Recipe> {
    let mut suggestions: Vec<Recipe> = Vec::new();

    if !recent.is_empty() {
        let window = &recent[..recent.len().min(RECENT_INGREDIENT_WINDOW)];
        let batch = generate_recipes(window, cuisine_filter, DEFAULT_RECIPE_COUNT, rng);
        suggestions.extend(batch.into_iter().take(PER_SOURCE_SUGGESTIONS));
    }

    if !favorites.is_empty() {
        let ingredients: Vec<&str> = favorites
            .iter()
            .flat_map(|recipe| recipe.all_ingredients())
            .take(FAVORITE_INGREDIENT_WINDOW)
            .collect();
        let batch =
            generate_recipes(ingredients.as_slice(), cuisine_filter, DEFAULT_RECIPE_COUNT, rng);
        suggestions.extend(batch.into_iter().take(PER_SOURCE_SUGGESTIONS));
    }

    if suggestions.is_empty() {
        if let Some(combo) = POPULAR_COMBINATIONS.choose(rng) {
            let batch = generate_recipes(*combo, cuisine_filter, DEFAULT_RECIPE_COUNT, rng);
            suggestions.extend(batch.into_iter().take(POPULAR_SUGGESTIONS));
        }
    }

    if !dietary_filter.is_empty() {
        suggestions.retain(|recipe| dietary_filter.iter().any(|tag| recipe.has_tag(*tag)));
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

/// One recipe per trending combination, with the combination's rating and
/// a random rating count. Cuisine filters are ignored so the list stays varied.
pub fn trending<R: Rng + ?Sized>(rng: &mut R) -> Vec<TrendingRecipe> {
    TRENDING_COMBINATIONS
        .iter()
        .filter_map(|combo| {
            let recipe = generate_recipes(combo.ingredients, &[], DEFAULT_RECIPE_COUNT, rng)
                .into_iter()
                .next()?;
            Some(TrendingRecipe {
                rated: RatedRecipe {
                    recipe,
                    average_rating: Some(combo.rating),
                    total_ratings: rng.random_range(20..=69),
                    user_rating: None,
                },
                favorites: combo.favorites,
            })
        })
        .take(MAX_TRENDING)
        .collect()
}
