//! Fuzzy keyword matching over static tables.
//!
//! Two ingredient strings match when either one contains the other,
//! ignoring case. "chicken breast" matches "chicken", and so does "hick".
//! Tables are ordered lists of `(keyword, value)` pairs where the first
//! matching keyword wins.

/// Case-insensitive containment in either direction.
///
/// Empty strings (after trimming) never match anything.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// True if `item` fuzzily matches any keyword in `keywords`.
pub fn matches_any(item: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| fuzzy_match(item, keyword))
}

/// True if any of `items` fuzzily matches any of `keywords`.
pub fn any_matches<S: AsRef<str>>(items: &[S], keywords: &[&str]) -> bool {
    items.iter().any(|item| matches_any(item.as_ref(), keywords))
}

/// An ordered `(keyword, value)` table with first-match-wins lookup.
#[derive(Debug)]
pub struct KeywordTable<V: 'static> {
    entries: &'static [(&'static str, V)],
}

impl<V: 'static> KeywordTable<V> {
    pub const fn new(entries: &'static [(&'static str, V)]) -> Self {
        Self { entries }
    }

    /// Find the first entry whose keyword fuzzily matches `item`.
    pub fn lookup(&self, item: &str) -> Option<&'static V> {
        self.lookup_entry(item).map(|(_, value)| value)
    }

    /// Like [`lookup`](Self::lookup) but also returns the matched keyword.
    pub fn lookup_entry(&self, item: &str) -> Option<&'static (&'static str, V)> {
        self.entries
            .iter()
            .find(|(keyword, _)| fuzzy_match(item, keyword))
    }

    pub fn entries(&self) -> &'static [(&'static str, V)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Uppercase the first character and keep the rest as-is.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: KeywordTable<u32> = KeywordTable::new(&[("bell peppers", 1), ("pepper", 2)]);

    #[test]
    fn test_either_direction() {
        assert!(fuzzy_match("chicken breast", "chicken"));
        assert!(fuzzy_match("chicken", "Chicken Breast"));
        assert!(fuzzy_match("pepper", "bell peppers"));
        assert!(!fuzzy_match("rice", "chicken"));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!fuzzy_match("", "rice"));
        assert!(!fuzzy_match("rice", "  "));
    }

    #[test]
    fn test_first_match_wins() {
        // "pepper" is contained in "bell peppers", so the first row wins
        assert_eq!(TABLE.lookup("pepper"), Some(&1));
        assert_eq!(TABLE.lookup("black pepper"), Some(&2));
        assert_eq!(TABLE.lookup("salt"), None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("chicken"), "Chicken");
        assert_eq!(capitalize("sOY"), "Soy");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize_first("soy sauce"), "Soy sauce");
        assert_eq!(capitalize_first("bBQ"), "BBQ");
    }
}
