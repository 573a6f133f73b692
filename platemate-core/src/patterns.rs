//! Templates the recipe generator combines: cooking methods, cuisine styles
//! and complementary ingredients.

use crate::types::Cuisine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookingMethod {
    pub name: &'static str,
    /// Display range, e.g. "12-15 min".
    pub time_range: &'static str,
    /// Lower bound of `time_range`, used as the base cook time.
    pub base_minutes: u32,
    /// Opening words of the description; the used ingredients follow.
    pub description: &'static str,
}

pub const COOKING_METHODS: &[CookingMethod] = &[
    CookingMethod {
        name: "Stir-Fried",
        time_range: "12-15 min",
        base_minutes: 12,
        description: "Quick and flavorful stir-fry with",
    },
    CookingMethod {
        name: "Roasted",
        time_range: "25-30 min",
        base_minutes: 25,
        description: "Perfectly roasted dish featuring",
    },
    CookingMethod {
        name: "Sautéed",
        time_range: "10-12 min",
        base_minutes: 10,
        description: "Light and healthy sauté with",
    },
    CookingMethod {
        name: "Braised",
        time_range: "35-40 min",
        base_minutes: 35,
        description: "Tender braised dish with",
    },
    CookingMethod {
        name: "Grilled",
        time_range: "15-20 min",
        base_minutes: 15,
        description: "Smoky grilled combination of",
    },
    CookingMethod {
        name: "Steamed",
        time_range: "18-22 min",
        base_minutes: 18,
        description: "Delicate steamed preparation with",
    },
    CookingMethod {
        name: "Pan-Seared",
        time_range: "8-10 min",
        base_minutes: 8,
        description: "Crispy pan-seared dish with",
    },
    CookingMethod {
        name: "Baked",
        time_range: "30-35 min",
        base_minutes: 30,
        description: "Comforting baked dish featuring",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuisineStyle {
    pub name: &'static str,
    pub seasonings: &'static [&'static str],
}

pub const CUISINE_STYLES: &[CuisineStyle] = &[
    CuisineStyle {
        name: "Asian-Inspired",
        seasonings: &["soy sauce", "ginger", "sesame oil", "garlic", "green onions"],
    },
    CuisineStyle {
        name: "Mediterranean",
        seasonings: &["olive oil", "herbs", "lemon juice", "garlic", "tomatoes"],
    },
    CuisineStyle {
        name: "Italian",
        seasonings: &["olive oil", "basil", "garlic", "parmesan", "tomatoes"],
    },
    CuisineStyle {
        name: "Mexican",
        seasonings: &["cumin", "chili powder", "lime juice", "cilantro", "onions"],
    },
    CuisineStyle {
        name: "Indian",
        seasonings: &["curry powder", "turmeric", "garam masala", "ginger", "garlic"],
    },
    CuisineStyle {
        name: "American",
        seasonings: &["salt", "pepper", "butter", "herbs", "onions"],
    },
    CuisineStyle {
        name: "Thai",
        seasonings: &["fish sauce", "lime juice", "chili", "basil", "coconut milk"],
    },
    CuisineStyle {
        name: "French",
        seasonings: &["butter", "herbs", "wine", "cream", "shallots"],
    },
    CuisineStyle {
        name: "Japanese",
        seasonings: &["soy sauce", "miso", "sake", "mirin", "ginger"],
    },
    CuisineStyle {
        name: "Middle Eastern",
        seasonings: &["cumin", "coriander", "sumac", "tahini", "lemon juice"],
    },
];

/// Substring of a style name -> displayed cuisine. First match wins.
const STYLE_CUISINES: &[(&str, Cuisine)] = &[
    ("Asian", Cuisine::Chinese),
    ("Mediterranean", Cuisine::Mediterranean),
    ("Italian", Cuisine::Italian),
    ("Mexican", Cuisine::Mexican),
    ("Indian", Cuisine::Indian),
    ("American", Cuisine::American),
    ("Thai", Cuisine::Thai),
    ("French", Cuisine::French),
    ("Japanese", Cuisine::Japanese),
    ("Middle Eastern", Cuisine::MiddleEastern),
];

impl CuisineStyle {
    pub fn cuisine(&self) -> Cuisine {
        cuisine_for_style(self.name)
    }
}

/// Map a style name to its displayed cuisine, defaulting to `Other`.
pub fn cuisine_for_style(style: &str) -> Cuisine {
    STYLE_CUISINES
        .iter()
        .find(|(fragment, _)| style.contains(fragment))
        .map(|(_, cuisine)| *cuisine)
        .unwrap_or(Cuisine::Other)
}

pub const PROTEINS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "tofu", "eggs", "beans", "lentils",
];

pub const VEGETABLES: &[&str] = &[
    "onions",
    "garlic",
    "bell peppers",
    "carrots",
    "celery",
    "mushrooms",
    "tomatoes",
    "spinach",
    "broccoli",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_cuisines() {
        assert_eq!(cuisine_for_style("Asian-Inspired"), Cuisine::Chinese);
        assert_eq!(cuisine_for_style("Middle Eastern"), Cuisine::MiddleEastern);
        assert_eq!(cuisine_for_style("Nordic"), Cuisine::Other);
    }

    #[test]
    fn test_every_style_maps_to_a_cuisine() {
        for style in CUISINE_STYLES {
            assert_ne!(style.cuisine(), Cuisine::Other, "{} unmapped", style.name);
        }
    }

    #[test]
    fn test_base_minutes_match_time_range() {
        for method in COOKING_METHODS {
            let lower = method.time_range.split('-').next().unwrap();
            assert_eq!(lower.parse::<u32>().unwrap(), method.base_minutes);
        }
    }
}
