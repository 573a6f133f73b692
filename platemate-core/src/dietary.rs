//! Dietary tag classification.
//!
//! Each rule is evaluated on its own over the combined ingredient list. A
//! recipe can be Vegan and Low-Carb and High-Protein at the same time.

use rand::Rng;
use std::collections::BTreeSet;

use crate::fuzzy::any_matches;
use crate::types::DietaryTag;

pub const ANIMAL_PROTEINS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "meat", "bacon", "ham",
];

pub const DAIRY: &[&str] = &["cheese", "milk", "butter", "cream", "yogurt"];

pub const EGGS: &[&str] = &["egg"];

/// Soy sauce is brewed with wheat.
pub const GLUTEN_SOURCES: &[&str] = &["pasta", "bread", "flour", "wheat", "noodles", "soy sauce"];

pub const HIGH_CARB: &[&str] = &[
    "rice", "pasta", "bread", "potatoes", "quinoa", "noodles", "couscous", "barley",
];

pub const PROTEIN_SOURCES: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "eggs", "beans", "lentils", "tofu",
    "cheese",
];

/// Chance that a label the rules did not derive is added anyway.
pub const BONUS_TAG_PROBABILITY: f64 = 0.3;

/// Tags that follow from the ingredient list alone.
pub fn deterministic_tags<S: AsRef<str>>(ingredients: &[S]) -> BTreeSet<DietaryTag> {
    let mut tags = BTreeSet::new();

    let has_animal = any_matches(ingredients, ANIMAL_PROTEINS);
    let has_dairy = any_matches(ingredients, DAIRY);
    let has_eggs = any_matches(ingredients, EGGS);

    if !has_animal && !has_dairy && !has_eggs {
        tags.insert(DietaryTag::Vegan);
    }
    if !has_animal {
        tags.insert(DietaryTag::Vegetarian);
    }
    if !any_matches(ingredients, GLUTEN_SOURCES) {
        tags.insert(DietaryTag::GlutenFree);
    }
    if !any_matches(ingredients, HIGH_CARB) {
        tags.insert(DietaryTag::LowCarb);
    }
    if any_matches(ingredients, PROTEIN_SOURCES) {
        tags.insert(DietaryTag::HighProtein);
    }

    tags
}

/// Deterministic tags plus, for variety, each remaining label with
/// probability [`BONUS_TAG_PROBABILITY`].
pub fn classify<S, R>(ingredients: &[S], rng: &mut R) -> BTreeSet<DietaryTag>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut tags = deterministic_tags(ingredients);
    for tag in DietaryTag::ALL {
        if !tags.contains(tag) && rng.random_bool(BONUS_TAG_PROBABILITY) {
            tags.insert(*tag);
        }
    }
    tags
}
