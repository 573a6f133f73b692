//! Narrowing a recipe batch by dietary tags and cuisine.

use crate::types::{Cuisine, DietaryTag, Recipe};

/// True if the recipe carries every tag in `dietary` and, when `cuisines`
/// is non-empty, belongs to one of them.
pub fn matches_filters(recipe: &Recipe, dietary: &[DietaryTag], cuisines: &[Cuisine]) -> bool {
    let has_tags = dietary.iter().all(|tag| recipe.has_tag(*tag));
    let has_cuisine = cuisines.is_empty() || cuisines.contains(&recipe.cuisine);
    has_tags && has_cuisine
}

pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    dietary: &[DietaryTag],
    cuisines: &[Cuisine],
) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| matches_filters(recipe, dietary, cuisines))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    fn recipe(title: &str, cuisine: Cuisine, tags: &[DietaryTag]) -> Recipe {
        Recipe {
            id: Uuid::nil(),
            title: title.to_string(),
            description: String::new(),
            cook_time: "20 min".to_string(),
            servings: 2,
            used_ingredients: vec![],
            missing_ingredients: vec![],
            full_ingredient_list: vec![],
            dietary_tags: tags.iter().copied().collect::<BTreeSet<_>>(),
            cuisine,
            nutrition: None,
            instructions: vec![],
        }
    }

    fn batch() -> Vec<Recipe> {
        vec![
            recipe("a", Cuisine::Thai, &[DietaryTag::Vegan, DietaryTag::Vegetarian]),
            recipe("b", Cuisine::Italian, &[DietaryTag::Vegetarian]),
            recipe("c", Cuisine::Thai, &[DietaryTag::HighProtein]),
        ]
    }

    fn titles(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        let recipes = batch();
        assert_eq!(filter_recipes(&recipes, &[], &[]).len(), 3);
    }

    #[test]
    fn test_all_dietary_tags_required() {
        let recipes = batch();
        let kept = filter_recipes(&recipes, &[DietaryTag::Vegetarian], &[]);
        assert_eq!(titles(&kept), vec!["a", "b"]);

        let kept = filter_recipes(&recipes, &[DietaryTag::Vegetarian, DietaryTag::Vegan], &[]);
        assert_eq!(titles(&kept), vec!["a"]);
    }

    #[test]
    fn test_cuisine_and_tags_combined() {
        let recipes = batch();
        let kept = filter_recipes(&recipes, &[], &[Cuisine::Thai]);
        assert_eq!(titles(&kept), vec!["a", "c"]);

        let kept = filter_recipes(&recipes, &[DietaryTag::Vegetarian], &[Cuisine::Thai]);
        assert_eq!(titles(&kept), vec!["a"]);

        assert!(filter_recipes(&recipes, &[], &[Cuisine::French]).is_empty());
    }
}
