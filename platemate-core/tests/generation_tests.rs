//! Invariant checks for recipe generation across many seeds.

use platemate_core::fuzzy::fuzzy_match;
use platemate_core::generator::MIN_COOK_MINUTES;
use platemate_core::patterns::{COOKING_METHODS, CUISINE_STYLES};
use platemate_core::reference_data::nutrition_match_count;
use platemate_core::{
    aggregate, dietary, generate_recipes, generate_recipes_with_stats, parse_pantry, Cuisine, Day,
    DietaryTag, MealPlan, MealSlot, Recipe, MAX_ATTEMPTS_PER_SLOT,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

const SEEDS: u64 = 200;

const PANTRIES: &[&str] = &[
    "chicken, broccoli, rice",
    "tofu spinach noodles",
    "salmon",
    "beef, carrots, potatoes, onions, garlic, mushrooms",
    "eggs, cheese, bread, tomatoes, basil, pasta, lentils",
];

fn batches() -> impl Iterator<Item = (u64, Vec<String>, Vec<Recipe>)> {
    PANTRIES.iter().flat_map(|text| {
        let pantry = parse_pantry(text);
        (0..SEEDS).map(move |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let recipes = generate_recipes(&pantry, &[], 5, &mut rng);
            (seed, pantry.clone(), recipes)
        })
    })
}

#[test]
fn test_used_and_missing_are_disjoint() {
    for (seed, _, recipes) in batches() {
        for recipe in &recipes {
            for used in &recipe.used_ingredients {
                for missing in &recipe.missing_ingredients {
                    assert!(
                        !fuzzy_match(used, missing),
                        "seed {}: {:?} overlaps {:?} in {}",
                        seed,
                        used,
                        missing,
                        recipe.title
                    );
                }
            }
        }
    }
}

#[test]
fn test_titles_unique_within_batch() {
    for (seed, _, recipes) in batches() {
        let titles: HashSet<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles.len(), recipes.len(), "seed {}", seed);
    }
}

#[test]
fn test_used_ingredients_come_from_pantry() {
    for (seed, pantry, recipes) in batches() {
        assert!(!recipes.is_empty(), "seed {}", seed);
        for recipe in &recipes {
            assert!(!recipe.used_ingredients.is_empty());
            assert!(recipe.used_ingredients.len() <= 4);
            for used in &recipe.used_ingredients {
                assert!(pantry.contains(used), "seed {}: {} not in pantry", seed, used);
            }
        }
    }
}

#[test]
fn test_nutrition_only_with_two_matches() {
    for (seed, _, recipes) in batches() {
        for recipe in &recipes {
            let matches = nutrition_match_count(recipe.all_ingredients());
            assert_eq!(recipe.nutrition.is_some(), matches >= 2, "seed {}", seed);
        }
    }
}

#[test]
fn test_deterministic_tags_always_present() {
    for (seed, _, recipes) in batches() {
        for recipe in &recipes {
            let all: Vec<&str> = recipe.all_ingredients().collect();
            let expected = dietary::deterministic_tags(&all);
            assert!(
                expected.is_subset(&recipe.dietary_tags),
                "seed {}: {:?} missing from {:?}",
                seed,
                expected,
                recipe.dietary_tags
            );
            if expected.contains(&DietaryTag::Vegan) {
                assert!(expected.contains(&DietaryTag::Vegetarian));
            }
        }
    }
}

#[test]
fn test_servings_and_cook_time_in_range() {
    for (seed, _, recipes) in batches() {
        for recipe in &recipes {
            assert!(
                (2..=4).contains(&recipe.servings),
                "seed {}: serves {}",
                seed,
                recipe.servings
            );

            let method = COOKING_METHODS
                .iter()
                .find(|m| recipe.title.contains(m.name))
                .unwrap_or_else(|| panic!("seed {}: no method in {}", seed, recipe.title));
            let minutes: i64 = recipe
                .cook_time
                .strip_suffix(" min")
                .and_then(|m| m.parse().ok())
                .unwrap_or_else(|| panic!("seed {}: bad cook time {:?}", seed, recipe.cook_time));
            let base = i64::from(method.base_minutes);
            assert!(
                minutes >= MIN_COOK_MINUTES.max(base - 2) && minutes <= base + 2,
                "seed {}: {} min for {} (base {})",
                seed,
                minutes,
                method.name,
                base
            );
        }
    }
}

#[test]
fn test_missing_ingredient_count() {
    for (seed, _, recipes) in batches() {
        for recipe in &recipes {
            assert!(recipe.missing_ingredients.len() <= 4, "seed {}", seed);

            let style = CUISINE_STYLES
                .iter()
                .find(|s| recipe.title.starts_with(s.name))
                .unwrap_or_else(|| panic!("seed {}: no style in {}", seed, recipe.title));
            // With no seasoning already on hand, the 2-3 sampled seasonings all survive
            let seasonings_free = style
                .seasonings
                .iter()
                .all(|s| !recipe.used_ingredients.iter().any(|u| fuzzy_match(u, s)));
            if seasonings_free {
                assert!(
                    recipe.missing_ingredients.len() >= 2,
                    "seed {}: {:?} for {}",
                    seed,
                    recipe.missing_ingredients,
                    recipe.title
                );
            }
        }
    }
}

#[test]
fn test_exhausted_titles_shorten_batch() {
    // A single ingredient and a single style allow one title per cooking method
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (recipes, stats) =
            generate_recipes_with_stats(&["tofu"], &[Cuisine::Thai], MAX_ATTEMPTS_PER_SLOT, &mut rng);

        assert!(recipes.len() <= COOKING_METHODS.len(), "seed {}", seed);
        assert!(recipes.len() < MAX_ATTEMPTS_PER_SLOT, "seed {}", seed);
        assert_eq!(stats.produced, recipes.len());
        assert_eq!(stats.produced + stats.skipped_slots, MAX_ATTEMPTS_PER_SLOT);
        assert!(stats.attempts >= stats.skipped_slots * MAX_ATTEMPTS_PER_SLOT);

        let titles: HashSet<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles.len(), recipes.len(), "seed {}", seed);
        assert!(recipes.iter().all(|r| r.title.starts_with("Thai ")));
    }
}

#[test]
fn test_chicken_broccoli_rice_pantry() {
    let pantry = parse_pantry("chicken, broccoli, rice");
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let recipes = generate_recipes(&pantry, &[], 5, &mut rng);
    assert!(!recipes.is_empty() && recipes.len() <= 5);
    for recipe in &recipes {
        for used in &recipe.used_ingredients {
            assert!(["chicken", "broccoli", "rice"].contains(&used.as_str()));
        }
    }
}

#[test]
fn test_cuisine_filter_honoured() {
    let pantry = parse_pantry("chicken, broccoli, rice, garlic");
    let filter = [Cuisine::Japanese, Cuisine::Mexican];
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for recipe in generate_recipes(&pantry, &filter, 5, &mut rng) {
            assert!(filter.contains(&recipe.cuisine), "seed {}: {}", seed, recipe.cuisine);
        }
    }
}

#[test]
fn test_generated_plan_aggregates_missing_ingredients() {
    let pantry = parse_pantry("beef, carrots, potatoes");
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let recipes = generate_recipes(&pantry, &[], 4, &mut rng);

    let mut plan = MealPlan::new();
    let slots = [
        (Day::Monday, MealSlot::Meal1),
        (Day::Monday, MealSlot::Meal2),
        (Day::Thursday, MealSlot::Meal1),
        (Day::Sunday, MealSlot::Meal2),
    ];
    for (recipe, (day, slot)) in recipes.iter().zip(slots) {
        plan.assign(day, slot, recipe.clone());
    }

    let list = aggregate(&plan);
    let total: u32 = list.items.iter().map(|i| i.quantity).sum();
    let expected: usize = recipes.iter().map(|r| r.missing_ingredients.len()).sum();
    assert_eq!(total as usize, expected);
}
