//! Grocery list aggregation.
//!
//! Folds the missing ingredients of every meal in a plan into one counted,
//! categorized shopping list. The list is rebuilt from scratch each time.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::fuzzy::capitalize_first;
use crate::ingredient_categorizer::{categorize, GroceryCategory};
use crate::meal_plan::MealPlan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub name: String,
    /// How many planned meals need this ingredient.
    pub quantity: u32,
    pub category: GroceryCategory,
    pub checked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryList {
    /// Sorted by category name, then item name.
    pub items: Vec<GroceryItem>,
    /// The same items grouped by category, each group in list order.
    pub by_category: BTreeMap<GroceryCategory, Vec<GroceryItem>>,
}

impl GroceryList {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Flip the checked state of the named item in `category`.
    ///
    /// Returns false if no such item exists.
    pub fn toggle_checked(&mut self, category: GroceryCategory, name: &str) -> bool {
        let Some(group) = self.by_category.get_mut(&category) else {
            return false;
        };
        let Some(grouped) = group.iter_mut().find(|item| item.name == name) else {
            return false;
        };
        grouped.checked = !grouped.checked;
        let checked = grouped.checked;

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.category == category && item.name == name)
        {
            item.checked = checked;
        }
        true
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.checked).count()
    }
}

/// Build the grocery list for a meal plan.
///
/// Names are compared after lowercasing and trimming; blank names are skipped.
pub fn aggregate(plan: &MealPlan) -> GroceryList {
    // normalized name -> occurrences
    let mut counts: HashMap<String, u32> = HashMap::new();

    for (_, _, recipe) in plan.iter() {
        for ingredient in &recipe.missing_ingredients {
            let normalized = ingredient.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            *counts.entry(normalized).or_insert(0) += 1;
        }
    }

    let mut items: Vec<GroceryItem> = counts
        .into_iter()
        .map(|(normalized, quantity)| GroceryItem {
            category: categorize(&normalized),
            name: capitalize_first(&normalized),
            quantity,
            checked: false,
        })
        .collect();

    items.sort_by(|a, b| {
        a.category
            .as_str()
            .cmp(b.category.as_str())
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut by_category: BTreeMap<GroceryCategory, Vec<GroceryItem>> = BTreeMap::new();
    for item in &items {
        by_category.entry(item.category).or_default().push(item.clone());
    }

    tracing::debug!(
        meals = plan.len(),
        items = items.len(),
        categories = by_category.len(),
        "Aggregated grocery list"
    );

    GroceryList { items, by_category }
}
