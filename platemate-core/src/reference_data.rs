//! Static ingredient reference data.
//!
//! Nutrition values are per 100g reference portion. Quantities are the
//! default display amounts used when building a recipe's ingredient list.
//! Both tables are matched fuzzily, first entry wins.

use crate::fuzzy::KeywordTable;
use crate::types::{NutritionProfile, QuantitySpec};

const fn n(
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
) -> NutritionProfile {
    NutritionProfile::new(calories, protein, carbs, fat, fiber, sugar)
}

pub static NUTRITION_TABLE: KeywordTable<NutritionProfile> = KeywordTable::new(&[
    // Proteins
    ("chicken", n(165.0, 31.0, 0.0, 3.6, 0.0, 0.0)),
    ("beef", n(250.0, 26.0, 0.0, 15.0, 0.0, 0.0)),
    ("pork", n(242.0, 27.0, 0.0, 14.0, 0.0, 0.0)),
    ("fish", n(206.0, 22.0, 0.0, 12.0, 0.0, 0.0)),
    ("salmon", n(208.0, 20.0, 0.0, 13.0, 0.0, 0.0)),
    ("tuna", n(144.0, 30.0, 0.0, 1.0, 0.0, 0.0)),
    ("tofu", n(76.0, 8.0, 1.9, 4.8, 0.3, 0.6)),
    ("eggs", n(155.0, 13.0, 1.1, 11.0, 0.0, 1.1)),
    ("beans", n(127.0, 8.7, 23.0, 0.5, 6.4, 0.3)),
    ("lentils", n(116.0, 9.0, 20.0, 0.4, 7.9, 1.8)),
    // Vegetables
    ("spinach", n(23.0, 2.9, 3.6, 0.4, 2.2, 0.4)),
    ("broccoli", n(34.0, 2.8, 7.0, 0.4, 2.6, 1.5)),
    ("carrots", n(41.0, 0.9, 10.0, 0.2, 2.8, 4.7)),
    ("tomatoes", n(18.0, 0.9, 3.9, 0.2, 1.2, 2.6)),
    ("onions", n(40.0, 1.1, 9.3, 0.1, 1.7, 4.2)),
    ("garlic", n(149.0, 6.4, 33.0, 0.5, 2.1, 1.0)),
    ("bell peppers", n(31.0, 1.0, 7.0, 0.3, 2.5, 4.2)),
    ("mushrooms", n(22.0, 3.1, 3.3, 0.3, 1.0, 2.0)),
    ("celery", n(16.0, 0.7, 3.0, 0.2, 1.6, 1.3)),
    ("cabbage", n(25.0, 1.3, 6.0, 0.1, 2.5, 3.2)),
    // Grains & starches
    ("rice", n(130.0, 2.7, 28.0, 0.3, 0.4, 0.1)),
    ("pasta", n(131.0, 5.0, 25.0, 1.1, 1.8, 0.6)),
    ("quinoa", n(120.0, 4.4, 22.0, 1.9, 2.8, 0.9)),
    ("bread", n(265.0, 9.0, 49.0, 3.2, 2.7, 5.7)),
    ("potatoes", n(77.0, 2.0, 17.0, 0.1, 2.2, 0.8)),
    ("noodles", n(138.0, 4.5, 25.0, 2.2, 1.2, 0.6)),
    // Dairy
    ("cheese", n(113.0, 7.0, 1.0, 9.0, 0.0, 1.0)),
    ("milk", n(42.0, 3.4, 5.0, 1.0, 0.0, 5.0)),
    ("butter", n(717.0, 0.9, 0.1, 81.0, 0.0, 0.1)),
    ("cream", n(345.0, 2.8, 3.4, 37.0, 0.0, 3.4)),
    ("yogurt", n(59.0, 10.0, 3.6, 0.4, 0.0, 3.2)),
]);

const fn q(quantity: &'static str, unit: &'static str) -> (&'static str, &'static str) {
    (quantity, unit)
}

pub static QUANTITY_TABLE: KeywordTable<(&'static str, &'static str)> = KeywordTable::new(&[
    // Proteins
    ("chicken", q("1", "lb")),
    ("beef", q("1", "lb")),
    ("pork", q("1", "lb")),
    ("fish", q("1", "lb")),
    ("salmon", q("1", "lb")),
    ("tuna", q("1", "can")),
    ("tofu", q("1", "block")),
    ("eggs", q("2", "large")),
    ("beans", q("1", "can")),
    ("lentils", q("1", "cup")),
    // Vegetables
    ("onions", q("1", "medium")),
    ("garlic", q("3", "cloves")),
    ("bell peppers", q("1", "large")),
    ("carrots", q("2", "medium")),
    ("celery", q("2", "stalks")),
    ("mushrooms", q("8", "oz")),
    ("tomatoes", q("2", "medium")),
    ("spinach", q("4", "cups")),
    ("broccoli", q("1", "head")),
    ("cabbage", q("½", "head")),
    ("potatoes", q("2", "medium")),
    ("ginger", q("1", "inch piece")),
    // Grains & starches
    ("rice", q("1", "cup")),
    ("pasta", q("8", "oz")),
    ("quinoa", q("1", "cup")),
    ("bread", q("4", "slices")),
    ("noodles", q("8", "oz")),
    // Dairy
    ("cheese", q("1", "cup shredded")),
    ("milk", q("1", "cup")),
    ("butter", q("2", "tablespoons")),
    ("cream", q("½", "cup")),
    ("yogurt", q("1", "cup")),
    // Seasonings & liquids
    ("salt", q("1", "teaspoon")),
    ("pepper", q("½", "teaspoon")),
    ("olive oil", q("2", "tablespoons")),
    ("soy sauce", q("2", "tablespoons")),
    ("vinegar", q("1", "tablespoon")),
    ("herbs", q("1", "tablespoon fresh")),
    ("spices", q("1", "teaspoon")),
    ("lemon juice", q("2", "tablespoons")),
    ("broth", q("2", "cups")),
    ("stock", q("2", "cups")),
]);

/// Used when an ingredient has no entry in [`QUANTITY_TABLE`].
pub const DEFAULT_QUANTITY: (&str, &str) = ("1", "piece");

/// Minimum number of matched ingredients before nutrition is reported.
pub const MIN_NUTRITION_MATCHES: usize = 2;

/// Look up the 100g reference profile for an ingredient.
pub fn nutrition_for(ingredient: &str) -> Option<NutritionProfile> {
    NUTRITION_TABLE.lookup(ingredient).copied()
}

/// Look up the default display quantity for an ingredient.
pub fn quantity_for(ingredient: &str) -> QuantitySpec {
    let (quantity, unit) = QUANTITY_TABLE
        .lookup(ingredient)
        .copied()
        .unwrap_or(DEFAULT_QUANTITY);
    QuantitySpec::new(quantity, unit)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Per-serving nutrition for a set of ingredients.
///
/// Sums the 100g profile of every ingredient found in the table and divides
/// by `servings`. Calories are rounded to whole numbers, macros to one
/// decimal place. Returns `None` unless at least
/// [`MIN_NUTRITION_MATCHES`] ingredients were recognised.
pub fn nutrition_per_serving<'a, I>(ingredients: I, servings: u32) -> Option<NutritionProfile>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = NutritionProfile::default();
    let mut matched = 0usize;

    for ingredient in ingredients {
        if let Some(profile) = nutrition_for(ingredient) {
            total += profile;
            matched += 1;
        }
    }

    if matched < MIN_NUTRITION_MATCHES {
        return None;
    }

    let servings = f64::from(servings.max(1));
    Some(NutritionProfile {
        calories: (total.calories / servings).round(),
        protein_grams: round_to_tenth(total.protein_grams / servings),
        carb_grams: round_to_tenth(total.carb_grams / servings),
        fat_grams: round_to_tenth(total.fat_grams / servings),
        fiber_grams: round_to_tenth(total.fiber_grams / servings),
        sugar_grams: round_to_tenth(total.sugar_grams / servings),
    })
}

/// Number of ingredients that have nutrition data.
pub fn nutrition_match_count<'a, I>(ingredients: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    ingredients
        .into_iter()
        .filter(|ingredient| nutrition_for(ingredient).is_some())
        .count()
}
