//! Pantry text parsing and the recent-ingredients history.

use regex::Regex;
use std::sync::LazyLock;

/// Most recent ingredients remembered per user.
pub const MAX_RECENT_INGREDIENTS: usize = 10;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("Invalid separator regex"));

/// Split free text like "Chicken, broccoli  rice" into ingredient tokens.
///
/// Tokens are lowercased; single-character tokens and repeats are dropped.
pub fn parse_pantry(input: &str) -> Vec<String> {
    let lower = input.to_lowercase();
    let mut tokens: Vec<String> = Vec::new();
    for token in SEPARATORS.split(&lower) {
        let token = token.trim();
        if token.chars().count() <= 1 || tokens.iter().any(|t| t == token) {
            continue;
        }
        tokens.push(token.to_string());
    }
    tokens
}

/// Merge newly entered ingredients into the history, newest first.
pub fn remember_recent(new: &[String], existing: &[String]) -> Vec<String> {
    let mut recent: Vec<String> = Vec::with_capacity(MAX_RECENT_INGREDIENTS);
    for item in new.iter().chain(existing) {
        if recent.len() == MAX_RECENT_INGREDIENTS {
            break;
        }
        if !recent.contains(item) {
            recent.push(item.clone());
        }
    }
    recent
}
