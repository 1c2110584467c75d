//! List filtering primitives shared by every dashboard listing.

use core::str::FromStr;

use crate::error::DomainError;

/// "Show everything" or "show only records whose field equals this value".
///
/// Parsed from the listing's select box value: `all` (or blank) means
/// [`Selector::All`], anything else is parsed as `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }

    /// Match against an optional reference; `All` also passes records
    /// without one.
    pub fn matches_option(&self, value: Option<&T>) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => value == Some(expected),
        }
    }
}

impl<T> FromStr for Selector<T>
where
    T: FromStr<Err = DomainError>,
{
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        raw.parse().map(Selector::Only)
    }
}

/// Case-insensitive substring search over several fields; a blank needle
/// matches everything.
pub fn text_matches(needle: &str, fields: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ProjectId;

    #[test]
    fn all_passes_everything_including_missing_references() {
        let sel: Selector<ProjectId> = "all".parse().unwrap();
        assert!(sel.matches(&ProjectId::sequential(1)));
        assert!(sel.matches_option(None));
    }

    #[test]
    fn only_requires_exact_match() {
        let sel: Selector<ProjectId> = "PRJ-002".parse().unwrap();
        assert!(sel.matches(&ProjectId::sequential(2)));
        assert!(!sel.matches(&ProjectId::sequential(1)));
        assert!(!sel.matches_option(None));
    }

    #[test]
    fn invalid_selector_value_is_reported() {
        assert!("nope".parse::<Selector<ProjectId>>().is_err());
    }

    #[test]
    fn text_search_is_case_insensitive_and_unicode_aware() {
        assert!(text_matches("béton", &["Béton armé C30/37", "BET-C30"]));
        assert!(text_matches("bet-c", &["Béton armé C30/37", "BET-C30"]));
        assert!(!text_matches("acier", &["Béton armé C30/37", "BET-C30"]));
        assert!(text_matches("   ", &["anything"]));
    }
}
