//! Procedural recipe generation.
//!
//! Each recipe combines a cooking method, a cuisine style and a handful of
//! pantry ingredients. Titles are unique within a batch; a slot that cannot
//! find a fresh title within [`MAX_ATTEMPTS_PER_SLOT`] tries is left empty,
//! so a batch may come back short.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

use crate::dietary;
use crate::fuzzy::{capitalize, fuzzy_match, matches_any};
use crate::instructions::{self, InstructionInput};
use crate::patterns::{CookingMethod, CuisineStyle, COOKING_METHODS, CUISINE_STYLES, PROTEINS, VEGETABLES};
use crate::reference_data::{nutrition_per_serving, quantity_for};
use crate::types::{Cuisine, IngredientWithQuantity, Recipe};

pub const DEFAULT_RECIPE_COUNT: usize = 5;

/// Title attempts per slot before the slot is given up.
pub const MAX_ATTEMPTS_PER_SLOT: usize = 20;

/// Chance of adding a protein when the used ingredients have none.
pub const MISSING_PROTEIN_PROBABILITY: f64 = 0.5;

/// Chance of adding a vegetable when the used ingredients have none.
pub const MISSING_VEGETABLE_PROBABILITY: f64 = 0.7;

pub const MIN_COOK_MINUTES: i64 = 5;

/// Statistics about one generation call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationStats {
    pub requested: usize,
    pub produced: usize,
    pub attempts: usize,
    pub title_collisions: usize,
    pub skipped_slots: usize,
}

/// Generate up to `count` recipes from the pantry.
///
/// When `cuisine_filter` is non-empty only styles mapping to one of those
/// cuisines are used, unless none do, in which case every style is.
pub fn generate_recipes<S, R>(
    pantry: &[S],
    cuisine_filter: &[Cuisine],
    count: usize,
    rng: &mut R,
) -> Vec<Recipe>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    generate_recipes_with_stats(pantry, cuisine_filter, count, rng).0
}

/// Like [`generate_recipes`] but also reports how the batch was filled.
pub fn generate_recipes_with_stats<S, R>(
    pantry: &[S],
    cuisine_filter: &[Cuisine],
    count: usize,
    rng: &mut R,
) -> (Vec<Recipe>, GenerationStats)
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut stats = GenerationStats {
        requested: count,
        ..Default::default()
    };

    let pantry: Vec<String> = pantry
        .iter()
        .map(|item| item.as_ref().trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect();

    if pantry.is_empty() {
        tracing::debug!("Empty pantry, nothing to generate");
        return (Vec::new(), stats);
    }

    let styles = styles_for_filter(cuisine_filter);
    let mut used_titles: HashSet<String> = HashSet::new();
    let mut recipes = Vec::with_capacity(count);

    for slot in 0..count {
        match fill_slot(&pantry, &styles, &used_titles, &mut stats, rng) {
            Some(recipe) => {
                used_titles.insert(recipe.title.clone());
                recipes.push(recipe);
            }
            None => {
                stats.skipped_slots += 1;
                tracing::warn!(
                    slot,
                    attempts = MAX_ATTEMPTS_PER_SLOT,
                    "No unique recipe title found, skipping slot"
                );
            }
        }
    }

    stats.produced = recipes.len();
    tracing::debug!(
        requested = stats.requested,
        produced = stats.produced,
        attempts = stats.attempts,
        collisions = stats.title_collisions,
        "Generated recipe batch"
    );

    (recipes, stats)
}

/// Styles allowed by the filter, or all styles if the filter is empty or
/// matches nothing.
pub fn styles_for_filter(cuisine_filter: &[Cuisine]) -> Vec<&'static CuisineStyle> {
    if !cuisine_filter.is_empty() {
        let matching: Vec<&'static CuisineStyle> = CUISINE_STYLES
            .iter()
            .filter(|style| cuisine_filter.contains(&style.cuisine()))
            .collect();
        if !matching.is_empty() {
            return matching;
        }
    }
    CUISINE_STYLES.iter().collect()
}

fn fill_slot<R: Rng + ?Sized>(
    pantry: &[String],
    styles: &[&'static CuisineStyle],
    used_titles: &HashSet<String>,
    stats: &mut GenerationStats,
    rng: &mut R,
) -> Option<Recipe> {
    for _ in 0..MAX_ATTEMPTS_PER_SLOT {
        stats.attempts += 1;

        let method = COOKING_METHODS.choose(rng)?;
        let style = *styles.choose(rng)?;
        let used = select_used_ingredients(pantry, rng);
        let primary = used.first()?;
        let missing = select_missing_ingredients(&used, style, rng);

        let title = format!("{} {} {}", style.name, method.name, capitalize(primary));
        if used_titles.contains(&title) {
            stats.title_collisions += 1;
            continue;
        }

        return Some(assemble_recipe(title, method, style, used, missing, rng));
    }
    None
}

/// Shuffle the pantry and take the first 2-4 items (fewer if the pantry is smaller).
pub fn select_used_ingredients<R: Rng + ?Sized>(pantry: &[String], rng: &mut R) -> Vec<String> {
    let take = pantry.len().min(rng.random_range(2..=4));
    let mut shuffled = pantry.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(take);
    shuffled
}

/// Pick the ingredients a recipe needs beyond what the pantry supplies.
///
/// Takes 2-3 of the style's seasonings, maybe a protein and a vegetable when
/// the used ingredients lack them, then drops duplicates and anything that
/// fuzzily matches a used ingredient and keeps at most 2-4 items.
pub fn select_missing_ingredients<R: Rng + ?Sized>(
    used: &[String],
    style: &CuisineStyle,
    rng: &mut R,
) -> Vec<String> {
    let mut seasonings = style.seasonings.to_vec();
    seasonings.shuffle(rng);
    let seasoning_count = rng.random_range(2..=3);

    let mut candidates: Vec<&str> = seasonings.into_iter().take(seasoning_count).collect();

    let has_protein = used.iter().any(|item| matches_any(item, PROTEINS));
    if !has_protein && rng.random_bool(MISSING_PROTEIN_PROBABILITY) {
        if let Some(protein) = PROTEINS.choose(rng) {
            candidates.push(*protein);
        }
    }

    let has_vegetable = used.iter().any(|item| matches_any(item, VEGETABLES));
    if !has_vegetable && rng.random_bool(MISSING_VEGETABLE_PROBABILITY) {
        if let Some(vegetable) = VEGETABLES.choose(rng) {
            candidates.push(*vegetable);
        }
    }

    let mut missing: Vec<String> = Vec::new();
    for candidate in candidates {
        if missing.iter().any(|m| m == candidate) {
            continue;
        }
        if used.iter().any(|u| fuzzy_match(u, candidate)) {
            continue;
        }
        missing.push(candidate.to_string());
    }

    let cap = rng.random_range(2..=4);
    missing.truncate(cap);
    missing
}

fn assemble_recipe<R: Rng + ?Sized>(
    title: String,
    method: &CookingMethod,
    style: &CuisineStyle,
    used: Vec<String>,
    missing: Vec<String>,
    rng: &mut R,
) -> Recipe {
    let description = format!(
        "{} {} and aromatic seasonings.",
        method.description,
        used.iter().take(2).cloned().collect::<Vec<_>>().join(" and ")
    );

    let servings: u32 = rng.random_range(2..=4);
    let variation: i64 = rng.random_range(-2..=2);
    let minutes = (i64::from(method.base_minutes) + variation).max(MIN_COOK_MINUTES);
    let cook_time = format!("{} min", minutes);

    let all: Vec<String> = used.iter().chain(missing.iter()).cloned().collect();

    let dietary_tags = dietary::classify(&all, rng);
    let nutrition = nutrition_per_serving(all.iter().map(String::as_str), servings);
    let full_ingredient_list: Vec<IngredientWithQuantity> = all
        .iter()
        .map(|name| IngredientWithQuantity {
            name: name.clone(),
            quantity: quantity_for(name),
        })
        .collect();

    let instructions = instructions::synthesize(InstructionInput {
        title: &title,
        used_ingredients: &used,
        missing_ingredients: &missing,
        full_ingredient_list: &full_ingredient_list,
    });

    let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();

    Recipe {
        id,
        title,
        description,
        cook_time,
        servings,
        used_ingredients: used,
        missing_ingredients: missing,
        full_ingredient_list,
        dietary_tags,
        cuisine: style.cuisine(),
        nutrition,
        instructions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pantry(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_pantry_yields_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let (recipes, stats) = generate_recipes_with_stats(&Vec::<String>::new(), &[], 5, &mut rng);
        assert!(recipes.is_empty());
        assert_eq!(stats.attempts, 0);

        let recipes = generate_recipes(&["  ", ""], &[], 5, &mut rng);
        assert!(recipes.is_empty());
    }

    #[test]
    fn test_same_seed_same_batch() {
        let items = pantry(&["chicken", "broccoli", "rice"]);
        let a = generate_recipes(&items, &[], 5, &mut ChaCha8Rng::seed_from_u64(42));
        let b = generate_recipes(&items, &[], 5, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_ingredient_pantry() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let recipes = generate_recipes(&["salmon"], &[], 5, &mut rng);
        assert!(!recipes.is_empty());
        for recipe in &recipes {
            assert_eq!(recipe.used_ingredients, vec!["salmon".to_string()]);
            assert!(recipe.title.ends_with("Salmon"));
        }
    }

    #[test]
    fn test_collisions_exhaust_slots() {
        // One ingredient and one style leaves 8 possible titles; asking for
        // far more than that must come back short without panicking.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let (recipes, stats) =
            generate_recipes_with_stats(&["tofu"], &[Cuisine::Thai], 30, &mut rng);
        assert!(recipes.len() <= COOKING_METHODS.len());
        assert_eq!(stats.produced + stats.skipped_slots, 30);
        assert!(stats.skipped_slots > 0);
        assert!(stats.title_collisions > 0);
    }

    #[test]
    fn test_cuisine_filter_restricts_styles() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let items = pantry(&["beef", "carrots", "potatoes", "celery"]);
        let recipes = generate_recipes(&items, &[Cuisine::Italian, Cuisine::Thai], 5, &mut rng);
        for recipe in &recipes {
            assert!(matches!(recipe.cuisine, Cuisine::Italian | Cuisine::Thai));
        }
    }

    #[test]
    fn test_unmatched_cuisine_filter_falls_back() {
        assert_eq!(styles_for_filter(&[Cuisine::Other]).len(), CUISINE_STYLES.len());
        assert_eq!(styles_for_filter(&[]).len(), CUISINE_STYLES.len());
        assert_eq!(styles_for_filter(&[Cuisine::Chinese]).len(), 1);
    }

    #[test]
    fn test_missing_excludes_used() {
        let style = CUISINE_STYLES
            .iter()
            .find(|s| s.name == "Asian-Inspired")
            .unwrap();
        let used = pantry(&["garlic", "ginger", "soy sauce"]);
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let missing = select_missing_ingredients(&used, style, &mut rng);
            assert!(missing.len() <= 4);
            for m in &missing {
                assert!(!used.iter().any(|u| fuzzy_match(u, m)), "{} overlaps", m);
            }
        }
    }

    #[test]
    fn test_used_ingredient_count() {
        let items = pantry(&["a1", "b2", "c3", "d4", "e5", "f6"]);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let used = select_used_ingredients(&items, &mut rng);
            assert!((2..=4).contains(&used.len()));
        }
    }

    #[test]
    fn test_recipe_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let items = pantry(&["chicken", "broccoli", "rice"]);
        for recipe in generate_recipes(&items, &[], 5, &mut rng) {
            assert!((2..=4).contains(&recipe.servings));
            let minutes: i64 = recipe.cook_time.trim_end_matches(" min").parse().unwrap();
            assert!(minutes >= MIN_COOK_MINUTES);
            assert_eq!(
                recipe.full_ingredient_list.len(),
                recipe.used_ingredients.len() + recipe.missing_ingredients.len()
            );
            assert!(!recipe.instructions.is_empty());
            assert!(recipe.description.ends_with("and aromatic seasonings."));
        }
    }
}
