//! Cooking instruction synthesis.
//!
//! A template is chosen from the cooking method named in the recipe title.
//! Ingredient mentions in each step are then expanded with their
//! quantities, and the generic words "aromatics", "herbs" and "seasonings"
//! are swapped for a concrete ingredient when the recipe has one.

use regex::{NoExpand, Regex, RegexBuilder};

use crate::types::IngredientWithQuantity;

/// Marks where the recipe's primary ingredient goes in a template step.
const PRIMARY: &str = "{primary}";

/// Method keyword (lowercase, as found in titles) -> steps. Checked in order.
pub const INSTRUCTION_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "stir-fried",
        &[
            "Heat oil in a large pan or wok over medium-high heat.",
            "Add garlic and aromatics, sauté until fragrant (about 30 seconds).",
            "Add {primary} and cook until browned.",
            "Stir in remaining vegetables and cook for 3-4 minutes.",
            "Add seasonings and sauces. Toss everything together.",
            "Cook for another 2-3 minutes until heated through.",
            "Serve hot with rice or noodles.",
        ],
    ),
    (
        "roasted",
        &[
            "Preheat oven to 400°F (200°C).",
            "Prepare ingredients by washing and cutting into even pieces.",
            "Season {primary} with salt, pepper, and herbs.",
            "Arrange ingredients on a baking sheet in a single layer.",
            "Drizzle with olive oil and toss to coat evenly.",
            "Roast for 20-25 minutes, turning once halfway through.",
            "Check for doneness and serve immediately.",
        ],
    ),
    (
        "sautéed",
        &[
            "Heat oil in a pan over medium heat.",
            "Add garlic and sauté until fragrant.",
            "Add {primary} and cook until tender.",
            "Season with herbs and spices to taste.",
            "Cook for 8-10 minutes, stirring occasionally.",
            "Adjust seasoning and serve hot.",
        ],
    ),
    (
        "braised",
        &[
            "Heat oil in a heavy-bottomed pot over medium-high heat.",
            "Brown {primary} on all sides.",
            "Add aromatics like onions and garlic, cook until softened.",
            "Add liquid (broth or wine) to cover halfway.",
            "Bring to a simmer, then reduce heat to low.",
            "Cover and cook slowly for 30-35 minutes.",
            "Check tenderness and adjust seasoning before serving.",
        ],
    ),
    (
        "grilled",
        &[
            "Preheat grill to medium-high heat.",
            "Clean and oil the grill grates.",
            "Season {primary} with salt, pepper, and desired spices.",
            "Place on grill and cook for 6-8 minutes per side.",
            "Check for proper doneness with a thermometer if needed.",
            "Let rest for 2-3 minutes before serving.",
            "Serve with fresh herbs or sauce.",
        ],
    ),
    (
        "steamed",
        &[
            "Set up a steamer basket over boiling water.",
            "Prepare ingredients by washing and cutting uniformly.",
            "Place {primary} in steamer basket.",
            "Cover and steam for 15-18 minutes.",
            "Check for tenderness with a fork.",
            "Season lightly with salt and herbs.",
            "Serve immediately while hot.",
        ],
    ),
    (
        "pan-seared",
        &[
            "Heat oil in a heavy skillet over medium-high heat.",
            "Pat {primary} dry and season both sides.",
            "Place in hot pan and don't move for 3-4 minutes.",
            "Flip and cook for another 3-4 minutes.",
            "Add butter and herbs to the pan.",
            "Baste with the flavored butter.",
            "Rest for 2 minutes before serving.",
        ],
    ),
    (
        "baked",
        &[
            "Preheat oven to 375°F (190°C).",
            "Grease a baking dish with oil or butter.",
            "Layer {primary} in the prepared dish.",
            "Add seasonings and any liquid ingredients.",
            "Cover with foil and bake for 25-30 minutes.",
            "Remove foil and bake for 5-10 minutes more.",
            "Let cool for 5 minutes before serving.",
        ],
    ),
];

pub const DEFAULT_METHOD: &str = "sautéed";

/// Generic placeholder word -> ingredient keyword that can stand in for it.
const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder {
        word: "aromatics",
        ingredient: "onion",
        keep_word: false,
    },
    Placeholder {
        word: "herbs",
        ingredient: "herb",
        keep_word: false,
    },
    Placeholder {
        word: "seasonings",
        ingredient: "soy sauce",
        keep_word: true,
    },
];

struct Placeholder {
    word: &'static str,
    ingredient: &'static str,
    /// Keep the generic word after the concrete ingredient ("soy sauce and seasonings").
    keep_word: bool,
}

/// The parts of a recipe the synthesizer reads.
#[derive(Debug, Clone, Copy)]
pub struct InstructionInput<'a> {
    pub title: &'a str,
    pub used_ingredients: &'a [String],
    pub missing_ingredients: &'a [String],
    pub full_ingredient_list: &'a [IngredientWithQuantity],
}

/// Pick the step template for a title. Falls back to the sautéed template.
pub fn template_for_title(title: &str) -> &'static [&'static str] {
    let lower = title.to_lowercase();
    INSTRUCTION_TEMPLATES
        .iter()
        .find(|(method, _)| lower.contains(method))
        .or_else(|| {
            INSTRUCTION_TEMPLATES
                .iter()
                .find(|(method, _)| *method == DEFAULT_METHOD)
        })
        .map(|(_, steps)| *steps)
        .unwrap_or(&[])
}

/// Produce ordered cooking steps for a recipe.
pub fn synthesize(recipe: InstructionInput<'_>) -> Vec<String> {
    let primary = recipe
        .used_ingredients
        .first()
        .map(String::as_str)
        .unwrap_or("the main ingredient");

    let expansions = ingredient_expansions(recipe.full_ingredient_list);

    template_for_title(recipe.title)
        .iter()
        .map(|step| {
            let mut text = step.replace(PRIMARY, primary);
            for (pattern, phrase) in &expansions {
                text = pattern.replace_all(&text, NoExpand(phrase)).into_owned();
            }
            fill_placeholders(&text, &recipe)
        })
        .collect()
}

/// One whole-word, case-insensitive pattern per distinct ingredient name.
fn ingredient_expansions(list: &[IngredientWithQuantity]) -> Vec<(Regex, String)> {
    let mut seen: Vec<String> = Vec::new();
    let mut expansions = Vec::new();

    for ingredient in list {
        let name = ingredient.name.trim().to_lowercase();
        if name.is_empty() || seen.contains(&name) {
            continue;
        }
        let pattern = format!(r"\b{}\b", regex::escape(&name));
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => expansions.push((re, ingredient.phrase())),
            Err(e) => tracing::warn!(ingredient = %name, error = %e, "Skipping ingredient expansion"),
        }
        seen.push(name);
    }

    expansions
}

fn fill_placeholders(step: &str, recipe: &InstructionInput<'_>) -> String {
    let mut text = step.to_string();

    for placeholder in PLACEHOLDERS {
        if !text.contains(placeholder.word) {
            continue;
        }
        // Already expanded by the ingredient pass
        if recipe
            .full_ingredient_list
            .iter()
            .any(|i| i.name.trim().eq_ignore_ascii_case(placeholder.word))
        {
            continue;
        }
        let present = recipe
            .used_ingredients
            .iter()
            .chain(recipe.missing_ingredients.iter())
            .any(|i| i.to_lowercase().contains(placeholder.ingredient));
        if !present {
            continue;
        }

        let phrase = recipe
            .full_ingredient_list
            .iter()
            .find(|i| i.name.to_lowercase().contains(placeholder.ingredient))
            .map(IngredientWithQuantity::phrase)
            .unwrap_or_else(|| placeholder.ingredient.to_string());
        let replacement = if placeholder.keep_word {
            format!("{} and {}", phrase, placeholder.word)
        } else {
            phrase
        };
        text = text.replacen(placeholder.word, &replacement, 1);
    }

    text
}
