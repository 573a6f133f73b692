//! `platemate plan`: inspect or reset a stored meal plan.

use anyhow::{Context, Result};
use platemate_core::{MealPlan, PlannerConfig};

use crate::user_data;

pub async fn show(config: &PlannerConfig, user: &str) -> Result<()> {
    let plan = user_data(config, user).load_meal_plan().await;
    if plan.is_empty() {
        println!("No meals planned for {}", user);
        return Ok(());
    }

    for (day, slot, recipe) in plan.iter() {
        println!("{:<9} {}  {}", day, slot, recipe.title);
        if !recipe.missing_ingredients.is_empty() {
            println!("{:<16}needs: {}", "", recipe.missing_ingredients.join(", "));
        }
    }
    Ok(())
}

pub async fn clear(config: &PlannerConfig, user: &str) -> Result<()> {
    let data = user_data(config, user);
    let removed = data.load_meal_plan().await.len();
    data.save_meal_plan(&MealPlan::new())
        .await
        .context("Failed to clear meal plan")?;
    println!("Removed {} meals from {}'s plan", removed, user);
    Ok(())
}
