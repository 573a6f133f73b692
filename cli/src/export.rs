//! `platemate grocery`: aggregate a stored meal plan and export the list.

use anyhow::{Context, Result};
use chrono::Utc;
use platemate_core::export::{render_html, render_text};
use platemate_core::subscription::week_start;
use platemate_core::{aggregate, PlannerConfig, UsageKind};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::{user_data, ExportFormat};

pub async fn grocery(
    config: &PlannerConfig,
    user: &str,
    format: ExportFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let data = user_data(config, user);
    let today = Utc::now().date_naive();
    let week = week_start(today);

    let subscription = data.load_subscription().await;
    let usage = data.load_usage(week).await;
    let used = usage.get(&UsageKind::GroceryList).copied().unwrap_or(0);
    let limits = subscription.limits();
    if !limits.allows(UsageKind::GroceryList, used, 1) {
        anyhow::bail!(
            "The {} plan allows {} grocery lists per week and {} have been generated since {}. Upgrade to Pro for unlimited lists.",
            subscription.plan,
            limits.grocery_lists_per_week.unwrap_or_default(),
            used,
            week
        );
    }

    let plan = data.load_meal_plan().await;
    if plan.is_empty() {
        println!("The meal plan for {} is empty; add recipes first.", user);
        return Ok(());
    }

    let list = aggregate(&plan);
    let rendered = match format {
        ExportFormat::Text => render_text(&list, today),
        ExportFormat::Html => render_html(&list, today),
    };

    match output_path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create file: {}", path.display()))?;
            file.write_all(rendered.as_bytes())
                .with_context(|| format!("Failed to write to file: {}", path.display()))?;
            println!("Wrote {} items to {}", list.len(), path.display());
        }
        None => println!("{}", rendered),
    }

    let count = data
        .record_usage(UsageKind::GroceryList, week, 1)
        .await
        .context("Failed to record grocery list usage")?;
    tracing::info!(user, week = %week, count, "Recorded grocery list");

    Ok(())
}
