use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::InputError;

/// Macro-nutrient totals. Reference data is per 100g; recipe values are per serving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionProfile {
    pub calories: f64,
    pub protein_grams: f64,
    pub carb_grams: f64,
    pub fat_grams: f64,
    pub fiber_grams: f64,
    pub sugar_grams: f64,
}

impl NutritionProfile {
    pub const fn new(
        calories: f64,
        protein_grams: f64,
        carb_grams: f64,
        fat_grams: f64,
        fiber_grams: f64,
        sugar_grams: f64,
    ) -> Self {
        Self {
            calories,
            protein_grams,
            carb_grams,
            fat_grams,
            fiber_grams,
            sugar_grams,
        }
    }
}

impl std::ops::AddAssign for NutritionProfile {
    fn add_assign(&mut self, other: Self) {
        self.calories += other.calories;
        self.protein_grams += other.protein_grams;
        self.carb_grams += other.carb_grams;
        self.fat_grams += other.fat_grams;
        self.fiber_grams += other.fiber_grams;
        self.sugar_grams += other.sugar_grams;
    }
}

/// Display quantity for an ingredient, e.g. "2" + "tablespoons".
/// Freeform text; no unit arithmetic is done on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySpec {
    pub quantity: String,
    pub unit: String,
}

impl QuantitySpec {
    pub fn new(quantity: &str, unit: &str) -> Self {
        Self {
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientWithQuantity {
    pub name: String,
    #[serde(flatten)]
    pub quantity: QuantitySpec,
}

impl IngredientWithQuantity {
    /// "3 cloves garlic"
    pub fn phrase(&self) -> String {
        format!(
            "{} {} {}",
            self.quantity.quantity,
            self.quantity.unit,
            self.name.to_lowercase()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DietaryTag {
    Vegan,
    Vegetarian,
    #[serde(rename = "Gluten-Free")]
    GlutenFree,
    #[serde(rename = "Low-Carb")]
    LowCarb,
    #[serde(rename = "High-Protein")]
    HighProtein,
}

impl DietaryTag {
    pub const ALL: &'static [DietaryTag] = &[
        DietaryTag::Vegan,
        DietaryTag::Vegetarian,
        DietaryTag::GlutenFree,
        DietaryTag::LowCarb,
        DietaryTag::HighProtein,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryTag::Vegan => "Vegan",
            DietaryTag::Vegetarian => "Vegetarian",
            DietaryTag::GlutenFree => "Gluten-Free",
            DietaryTag::LowCarb => "Low-Carb",
            DietaryTag::HighProtein => "High-Protein",
        }
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryTag {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        DietaryTag::ALL
            .iter()
            .find(|tag| tag.as_str().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| InputError::InvalidArgument(format!("Unknown dietary tag: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cuisine {
    Italian,
    Indian,
    Mexican,
    Mediterranean,
    Chinese,
    Thai,
    American,
    #[serde(rename = "Middle Eastern")]
    MiddleEastern,
    French,
    Japanese,
    Other,
}

impl Cuisine {
    pub const ALL: &'static [Cuisine] = &[
        Cuisine::Italian,
        Cuisine::Indian,
        Cuisine::Mexican,
        Cuisine::Mediterranean,
        Cuisine::Chinese,
        Cuisine::Thai,
        Cuisine::American,
        Cuisine::MiddleEastern,
        Cuisine::French,
        Cuisine::Japanese,
        Cuisine::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Italian => "Italian",
            Cuisine::Indian => "Indian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::Chinese => "Chinese",
            Cuisine::Thai => "Thai",
            Cuisine::American => "American",
            Cuisine::MiddleEastern => "Middle Eastern",
            Cuisine::French => "French",
            Cuisine::Japanese => "Japanese",
            Cuisine::Other => "Other",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cuisine {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Cuisine::ALL
            .iter()
            .find(|c| c.as_str().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| InputError::InvalidArgument(format!("Unknown cuisine: {}", s)))
    }
}

/// A generated recipe.
///
/// Recipes are snapshots: favorites and meal-plan entries hold full copies,
/// so they survive the batch they came from being replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub cook_time: String,
    pub servings: u32,
    /// Pantry ingredients this recipe uses, in selection order.
    pub used_ingredients: Vec<String>,
    /// Ingredients the recipe needs that the pantry lacks.
    pub missing_ingredients: Vec<String>,
    pub full_ingredient_list: Vec<IngredientWithQuantity>,
    pub dietary_tags: BTreeSet<DietaryTag>,
    pub cuisine: Cuisine,
    /// Absent when fewer than two ingredients have nutrition data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionProfile>,
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Used followed by missing ingredients.
    pub fn all_ingredients(&self) -> impl Iterator<Item = &str> {
        self.used_ingredients
            .iter()
            .chain(self.missing_ingredients.iter())
            .map(String::as_str)
    }

    pub fn has_tag(&self, tag: DietaryTag) -> bool {
        self.dietary_tags.contains(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dietary_tag_parsing() {
        assert_eq!("gluten free".parse::<DietaryTag>(), Ok(DietaryTag::GlutenFree));
        assert_eq!("High-Protein".parse::<DietaryTag>(), Ok(DietaryTag::HighProtein));
        assert!("paleo".parse::<DietaryTag>().is_err());
    }

    #[test]
    fn test_cuisine_parsing() {
        assert_eq!("middle-eastern".parse::<Cuisine>(), Ok(Cuisine::MiddleEastern));
        assert_eq!("THAI".parse::<Cuisine>(), Ok(Cuisine::Thai));
        assert!("martian".parse::<Cuisine>().is_err());
    }

    #[test]
    fn test_serialized_names() {
        assert_eq!(
            serde_json::to_string(&DietaryTag::GlutenFree).unwrap(),
            "\"Gluten-Free\""
        );
        assert_eq!(
            serde_json::to_string(&Cuisine::MiddleEastern).unwrap(),
            "\"Middle Eastern\""
        );
    }

    #[test]
    fn test_ingredient_phrase() {
        let ingredient = IngredientWithQuantity {
            name: "Garlic".to_string(),
            quantity: QuantitySpec::new("3", "cloves"),
        };
        assert_eq!(ingredient.phrase(), "3 cloves garlic");
    }
}
