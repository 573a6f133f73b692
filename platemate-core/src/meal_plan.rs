//! Weekly meal plan: up to two recipe snapshots per day.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;
use crate::types::Recipe;

/// Day of the week. `Ord` follows week order starting on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Day::ALL
            .into_iter()
            .find(|day| {
                day.as_str().eq_ignore_ascii_case(trimmed)
                    || (trimmed.len() == 3 && day.as_str()[..3].eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| InputError::InvalidArgument(format!("unknown day: {}", s)))
    }
}

/// One of the two meals a day can hold. Persisted as 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MealSlot {
    Meal1,
    Meal2,
}

impl MealSlot {
    pub const ALL: [MealSlot; 2] = [MealSlot::Meal1, MealSlot::Meal2];

    pub fn number(&self) -> u8 {
        match self {
            MealSlot::Meal1 => 1,
            MealSlot::Meal2 => 2,
        }
    }
}

impl TryFrom<u8> for MealSlot {
    type Error = InputError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(MealSlot::Meal1),
            2 => Ok(MealSlot::Meal2),
            _ => Err(InputError::InvalidArgument(format!(
                "meal slot must be 1 or 2, got {}",
                n
            ))),
        }
    }
}

impl From<MealSlot> for u8 {
    fn from(slot: MealSlot) -> u8 {
        slot.number()
    }
}

impl FromStr for MealSlot {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let digits = trimmed.strip_prefix("meal").unwrap_or(&trimmed);
        let n: u8 = digits
            .parse()
            .map_err(|_| InputError::InvalidArgument(format!("invalid meal slot: {}", s)))?;
        MealSlot::try_from(n)
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "meal{}", self.number())
    }
}

/// The two meals of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMeals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal1: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal2: Option<Recipe>,
}

impl DayMeals {
    pub fn get(&self, slot: MealSlot) -> Option<&Recipe> {
        match slot {
            MealSlot::Meal1 => self.meal1.as_ref(),
            MealSlot::Meal2 => self.meal2.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<Recipe> {
        match slot {
            MealSlot::Meal1 => &mut self.meal1,
            MealSlot::Meal2 => &mut self.meal2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meal1.is_none() && self.meal2.is_none()
    }

    /// Assigned recipes in slot order.
    pub fn recipes(&self) -> impl Iterator<Item = (MealSlot, &Recipe)> {
        MealSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|recipe| (slot, recipe)))
    }
}

/// A week of meals. Recipes are stored by value so the plan survives the
/// batch they came from being replaced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MealPlan {
    days: BTreeMap<Day, DayMeals>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a copy of `recipe` in the slot, returning whatever was there.
    pub fn assign(&mut self, day: Day, slot: MealSlot, recipe: Recipe) -> Option<Recipe> {
        self.days.entry(day).or_default().slot_mut(slot).replace(recipe)
    }

    /// Empty the slot. A day left with no meals is dropped from the plan.
    pub fn remove(&mut self, day: Day, slot: MealSlot) -> Option<Recipe> {
        let meals = self.days.get_mut(&day)?;
        let removed = meals.slot_mut(slot).take();
        if meals.is_empty() {
            self.days.remove(&day);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn get(&self, day: Day, slot: MealSlot) -> Option<&Recipe> {
        self.days.get(&day).and_then(|meals| meals.get(slot))
    }

    pub fn day(&self, day: Day) -> Option<&DayMeals> {
        self.days.get(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(DayMeals::is_empty)
    }

    /// Number of assigned meals.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Assigned meals in week order, then slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, MealSlot, &Recipe)> {
        self.days
            .iter()
            .flat_map(|(day, meals)| meals.recipes().map(move |(slot, recipe)| (*day, slot, recipe)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    use crate::types::Cuisine;

    fn recipe(title: &str) -> Recipe {
        Recipe {
            id: Uuid::nil(),
            title: title.to_string(),
            description: String::new(),
            cook_time: "20 min".to_string(),
            servings: 2,
            used_ingredients: vec![],
            missing_ingredients: vec![],
            full_ingredient_list: vec![],
            dietary_tags: BTreeSet::new(),
            cuisine: Cuisine::Other,
            nutrition: None,
            instructions: vec![],
        }
    }

    #[test]
    fn test_day_parsing() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Sun".parse::<Day>().unwrap(), Day::Sunday);
        assert!("Funday".parse::<Day>().is_err());
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("1".parse::<MealSlot>().unwrap(), MealSlot::Meal1);
        assert_eq!("meal2".parse::<MealSlot>().unwrap(), MealSlot::Meal2);
        assert!("3".parse::<MealSlot>().is_err());
        assert!(MealSlot::try_from(0).is_err());
    }

    #[test]
    fn test_assign_and_iterate_in_week_order() {
        let mut plan = MealPlan::new();
        plan.assign(Day::Friday, MealSlot::Meal2, recipe("c"));
        plan.assign(Day::Monday, MealSlot::Meal2, recipe("b"));
        plan.assign(Day::Monday, MealSlot::Meal1, recipe("a"));

        let order: Vec<(Day, MealSlot, &str)> = plan
            .iter()
            .map(|(d, s, r)| (d, s, r.title.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (Day::Monday, MealSlot::Meal1, "a"),
                (Day::Monday, MealSlot::Meal2, "b"),
                (Day::Friday, MealSlot::Meal2, "c"),
            ]
        );
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_assign_replaces() {
        let mut plan = MealPlan::new();
        assert!(plan.assign(Day::Monday, MealSlot::Meal1, recipe("a")).is_none());
        let previous = plan.assign(Day::Monday, MealSlot::Meal1, recipe("b"));
        assert_eq!(previous.unwrap().title, "a");
        assert_eq!(plan.get(Day::Monday, MealSlot::Meal1).unwrap().title, "b");
    }

    #[test]
    fn test_remove_drops_empty_day() {
        let mut plan = MealPlan::new();
        plan.assign(Day::Tuesday, MealSlot::Meal1, recipe("a"));
        plan.assign(Day::Tuesday, MealSlot::Meal2, recipe("b"));

        plan.remove(Day::Tuesday, MealSlot::Meal1);
        assert!(plan.day(Day::Tuesday).is_some());
        plan.remove(Day::Tuesday, MealSlot::Meal2);
        assert!(plan.day(Day::Tuesday).is_none());
        assert!(plan.is_empty());
        assert!(plan.remove(Day::Tuesday, MealSlot::Meal2).is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let mut plan = MealPlan::new();
        plan.assign(Day::Wednesday, MealSlot::Meal2, recipe("a"));
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["Wednesday"]["meal2"]["title"], "a");
        assert!(json["Wednesday"].get("meal1").is_none());

        let back: MealPlan = serde_json::from_value(json).unwrap();
        assert_eq!(back, plan);
    }
}
