//! Ingredient categorization for grocery list grouping.
//!
//! Maps ingredient names to store sections by fuzzy keyword matching. The
//! sections are checked in a fixed order and the first one with a matching
//! keyword wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::fuzzy::matches_any;

/// Store section an ingredient is shelved in.
///
/// Variants are declared in alphabetical order of their display names so the
/// derived `Ord` sorts the same way the names do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GroceryCategory {
    #[serde(rename = "Canned & Packaged")]
    CannedPackaged,
    Dairy,
    #[serde(rename = "Grains & Pantry")]
    GrainsPantry,
    #[serde(rename = "Meat & Seafood")]
    MeatSeafood,
    Other,
    Produce,
    #[serde(rename = "Spices & Seasonings")]
    SpicesSeasonings,
}

impl GroceryCategory {
    pub const ALL: [GroceryCategory; 7] = [
        GroceryCategory::CannedPackaged,
        GroceryCategory::Dairy,
        GroceryCategory::GrainsPantry,
        GroceryCategory::MeatSeafood,
        GroceryCategory::Other,
        GroceryCategory::Produce,
        GroceryCategory::SpicesSeasonings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryCategory::CannedPackaged => "Canned & Packaged",
            GroceryCategory::Dairy => "Dairy",
            GroceryCategory::GrainsPantry => "Grains & Pantry",
            GroceryCategory::MeatSeafood => "Meat & Seafood",
            GroceryCategory::Other => "Other",
            GroceryCategory::Produce => "Produce",
            GroceryCategory::SpicesSeasonings => "Spices & Seasonings",
        }
    }
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroceryCategory {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        GroceryCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| InputError::InvalidArgument(format!("unknown grocery category: {}", s)))
    }
}

const PRODUCE: &[&str] = &[
    "onions", "garlic", "bell peppers", "carrots", "celery", "mushrooms", "tomatoes", "spinach",
    "broccoli", "cabbage", "lettuce", "cucumber", "potatoes", "sweet potatoes", "avocado",
    "lemon", "lime", "ginger", "herbs", "cilantro", "parsley", "basil", "thyme", "rosemary",
];

const MEAT_SEAFOOD: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "tuna", "eggs", "tofu", "beans", "lentils",
    "chickpeas", "turkey", "shrimp", "bacon", "ham",
];

const DAIRY: &[&str] = &[
    "cheese", "milk", "butter", "cream", "yogurt", "sour cream", "mozzarella", "parmesan",
    "cheddar",
];

const GRAINS_PANTRY: &[&str] = &[
    "rice", "pasta", "quinoa", "bread", "flour", "noodles", "couscous", "barley", "oats",
    "cereal",
];

const SPICES_SEASONINGS: &[&str] = &[
    "salt", "pepper", "olive oil", "soy sauce", "vinegar", "cumin", "paprika", "chili powder",
    "curry powder", "turmeric", "garam masala", "oregano", "bay leaves", "cinnamon", "nutmeg",
    "vanilla", "sesame oil", "coconut oil", "balsamic", "mustard",
];

const CANNED_PACKAGED: &[&str] = &[
    "broth", "stock", "sauce", "paste", "canned", "coconut milk", "tomato sauce", "tomato paste",
];

/// Sections in the order they are checked.
const CATEGORY_KEYWORDS: &[(GroceryCategory, &[&str])] = &[
    (GroceryCategory::Produce, PRODUCE),
    (GroceryCategory::MeatSeafood, MEAT_SEAFOOD),
    (GroceryCategory::Dairy, DAIRY),
    (GroceryCategory::GrainsPantry, GRAINS_PANTRY),
    (GroceryCategory::SpicesSeasonings, SPICES_SEASONINGS),
    (GroceryCategory::CannedPackaged, CANNED_PACKAGED),
];

/// Categorize an ingredient by name.
///
/// Matching is case-insensitive containment in either direction. Returns
/// `Other` when nothing matches.
pub fn categorize(item: &str) -> GroceryCategory {
    let lower = item.trim().to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| matches_any(&lower, keywords))
        .map(|(category, _)| *category)
        .unwrap_or(GroceryCategory::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produce() {
        assert_eq!(categorize("garlic"), GroceryCategory::Produce);
        assert_eq!(categorize("Ginger"), GroceryCategory::Produce);
        assert_eq!(categorize("fresh basil"), GroceryCategory::Produce);
        assert_eq!(categorize("lime juice"), GroceryCategory::Produce);
    }

    #[test]
    fn test_meat_and_proteins() {
        assert_eq!(categorize("chicken breast"), GroceryCategory::MeatSeafood);
        assert_eq!(categorize("tofu"), GroceryCategory::MeatSeafood);
        assert_eq!(categorize("egg"), GroceryCategory::MeatSeafood);
    }

    #[test]
    fn test_dairy_and_grains() {
        assert_eq!(categorize("butter"), GroceryCategory::Dairy);
        assert_eq!(categorize("Parmesan"), GroceryCategory::Dairy);
        assert_eq!(categorize("brown rice"), GroceryCategory::GrainsPantry);
        assert_eq!(categorize("noodles"), GroceryCategory::GrainsPantry);
    }

    #[test]
    fn test_first_section_wins() {
        // "soy sauce" also contains the canned keyword "sauce".
        assert_eq!(categorize("soy sauce"), GroceryCategory::SpicesSeasonings);
        assert_eq!(categorize("fish sauce"), GroceryCategory::MeatSeafood);
        // "pepper" is contained in the produce keyword "bell peppers".
        assert_eq!(categorize("pepper"), GroceryCategory::Produce);
        assert_eq!(categorize("chicken stock"), GroceryCategory::MeatSeafood);
        assert_eq!(categorize("vegetable broth"), GroceryCategory::CannedPackaged);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(categorize("xyzfoobar123"), GroceryCategory::Other);
        assert_eq!(categorize(""), GroceryCategory::Other);
        assert_eq!(categorize("   "), GroceryCategory::Other);
    }

    #[test]
    fn test_display_names_sort_like_variants() {
        let mut by_name: Vec<&str> = GroceryCategory::ALL.iter().map(|c| c.as_str()).collect();
        by_name.sort();
        let by_variant: Vec<&str> = GroceryCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(by_name, by_variant);
    }

    #[test]
    fn test_parse_and_serialize() {
        assert_eq!(
            "meat & seafood".parse::<GroceryCategory>().unwrap(),
            GroceryCategory::MeatSeafood
        );
        assert!("Frozen".parse::<GroceryCategory>().is_err());
        assert_eq!(
            serde_json::to_string(&GroceryCategory::SpicesSeasonings).unwrap(),
            "\"Spices & Seasonings\""
        );
    }
}
