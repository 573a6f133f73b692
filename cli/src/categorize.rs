//! `platemate categorize`: show the grocery category of ingredients.

use anyhow::{Context, Result};
use platemate_core::categorize as category_for;
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn categorize(items: &[String], csv: Option<&Path>) -> Result<()> {
    let Some(output) = csv else {
        for item in items {
            println!("{}\t{}", item, category_for(item));
        }
        return Ok(());
    };

    let mut output_file = fs::File::create(output)
        .with_context(|| format!("Failed to create file: {}", output.display()))?;
    writeln!(output_file, "ingredient,category")?;

    for item in items {
        // Escape CSV fields that contain commas or quotes
        let escaped_item = if item.contains(',') || item.contains('"') {
            format!("\"{}\"", item.replace('"', "\"\""))
        } else {
            item.clone()
        };
        let category = category_for(item);
        let escaped_category = if category.as_str().contains(',') {
            format!("\"{}\"", category)
        } else {
            category.to_string()
        };
        writeln!(output_file, "{},{}", escaped_item, escaped_category)?;
    }

    println!("Wrote {} ingredients to {}", items.len(), output.display());
    Ok(())
}
