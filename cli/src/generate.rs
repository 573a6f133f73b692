//! `platemate generate`: build a recipe batch from pantry text.

use anyhow::{Context, Result};
use platemate_core::pantry::{parse_pantry, remember_recent};
use platemate_core::{
    generate_recipes_with_stats, Cuisine, Day, MealSlot, PlannerConfig, Recipe,
};

use crate::{make_rng, user_data};

pub struct GenerateOptions {
    pub cuisines: Vec<String>,
    pub count: usize,
    pub seed: Option<u64>,
    pub json: bool,
    pub user: Option<String>,
    pub day: Option<String>,
    pub slot: Option<String>,
}

pub async fn generate(config: &PlannerConfig, pantry_text: &str, options: GenerateOptions) -> Result<()> {
    let cuisines = options
        .cuisines
        .iter()
        .map(|c| c.parse::<Cuisine>())
        .collect::<Result<Vec<_>, _>>()?;

    // Validate the plan slot before doing any work.
    let placement = match (&options.day, &options.slot) {
        (Some(day), Some(slot)) => Some((day.parse::<Day>()?, slot.parse::<MealSlot>()?)),
        _ => None,
    };

    let pantry = parse_pantry(pantry_text);
    if pantry.is_empty() {
        println!("No ingredients recognised in {:?}", pantry_text);
        return Ok(());
    }

    let mut rng = make_rng(options.seed);
    let (recipes, stats) =
        generate_recipes_with_stats(&pantry, &cuisines, options.count, rng.as_mut());
    tracing::info!(
        produced = stats.produced,
        requested = stats.requested,
        skipped = stats.skipped_slots,
        "Generated recipes"
    );

    if options.json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
    } else {
        for recipe in &recipes {
            print_recipe(recipe);
        }
    }

    if let Some(user) = &options.user {
        let data = user_data(config, user);

        let recent = remember_recent(&pantry, &data.load_recent_ingredients().await);
        data.save_recent_ingredients(&recent)
            .await
            .context("Failed to save recent ingredients")?;

        if let Some((day, slot)) = placement {
            let Some(first) = recipes.first() else {
                anyhow::bail!("No recipe was generated to add to the plan");
            };
            let mut plan = data.load_meal_plan().await;
            plan.assign(day, slot, first.clone());
            data.save_meal_plan(&plan)
                .await
                .context("Failed to save meal plan")?;
            println!("Added \"{}\" to {} {}", first.title, day, slot);
        }
    }

    Ok(())
}

fn print_recipe(recipe: &Recipe) {
    println!(
        "{} ({}, {}, serves {})",
        recipe.title, recipe.cuisine, recipe.cook_time, recipe.servings
    );
    println!("  {}", recipe.description);
    println!("  Have: {}", recipe.used_ingredients.join(", "));
    println!("  Need: {}", recipe.missing_ingredients.join(", "));

    let tags: Vec<&str> = recipe.dietary_tags.iter().map(|t| t.as_str()).collect();
    if !tags.is_empty() {
        println!("  Tags: {}", tags.join(", "));
    }

    if let Some(n) = &recipe.nutrition {
        println!(
            "  Per serving: {} kcal, {}g protein, {}g carbs, {}g fat, {}g fiber, {}g sugar",
            n.calories, n.protein_grams, n.carb_grams, n.fat_grams, n.fiber_grams, n.sugar_grams
        );
    }

    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
}
