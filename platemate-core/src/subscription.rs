//! Subscription plans, their limits, and weekly usage counting.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Pro,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
        }
    }

    pub fn limits(&self) -> PlanLimits {
        match self {
            Plan::Free => PlanLimits {
                grocery_lists_per_week: Some(3),
                max_favorite_recipes: Some(10),
                max_dietary_filters: Some(1),
                has_early_access: false,
            },
            Plan::Pro => PlanLimits {
                grocery_lists_per_week: None,
                max_favorite_recipes: None,
                max_dietary_filters: None,
                has_early_access: true,
            },
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "pro" => Ok(Plan::Pro),
            _ => Err(InputError::InvalidArgument(format!("unknown plan: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Cancelled,
}

/// What a plan allows. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanLimits {
    pub grocery_lists_per_week: Option<u32>,
    pub max_favorite_recipes: Option<u32>,
    pub max_dietary_filters: Option<u32>,
    pub has_early_access: bool,
}

impl PlanLimits {
    pub fn limit_for(&self, kind: UsageKind) -> Option<u32> {
        match kind {
            UsageKind::GroceryList => self.grocery_lists_per_week,
            UsageKind::FavoriteRecipe => self.max_favorite_recipes,
            UsageKind::DietaryFilter => self.max_dietary_filters,
        }
    }

    /// Whether `additional` more uses fit on top of `current`.
    ///
    /// For grocery lists `current` is this week's count; for favorites and
    /// filters it is how many the user already has.
    pub fn allows(&self, kind: UsageKind, current: u32, additional: u32) -> bool {
        match self.limit_for(kind) {
            None => true,
            Some(limit) => current.saturating_add(additional) <= limit,
        }
    }
}

/// Metered actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    GroceryList,
    FavoriteRecipe,
    DietaryFilter,
}

impl UsageKind {
    pub const ALL: [UsageKind; 3] = [
        UsageKind::GroceryList,
        UsageKind::FavoriteRecipe,
        UsageKind::DietaryFilter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageKind::GroceryList => "grocery_list",
            UsageKind::FavoriteRecipe => "favorite_recipe",
            UsageKind::DietaryFilter => "dietary_filter",
        }
    }
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// An active free subscription.
    pub fn free(id: impl Into<String>, user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            plan: Plan::Free,
            status: SubscriptionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn limits(&self) -> PlanLimits {
        self.plan.limits()
    }
}

/// The Monday starting the week that contains `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = i64::from(date.weekday().num_days_from_monday());
    date - Duration::days(offset)
}
