//! PlaceIndex - ranked free-text search over a static destination catalog
//!
//! Lookup runs in three disjoint priority tiers: exact code match first,
//! then primary-label prefix matches, then substring matches across every
//! field. Each tier preserves the catalog's original order and an entry
//! never appears twice, even when it qualifies for several tiers.
//!
//! The search is a pure linear scan; no index is built up front. The
//! built-in catalog is a process-wide read-only dataset initialized once.

pub mod catalog;
pub mod cli;

use serde::{Deserialize, Serialize};

/// One searchable destination.
///
/// `code` is unique per place, but a `primary_label` may map to several
/// places (a city with more than one airport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Display name, typically the city ("Paris").
    pub primary_label: String,

    /// Secondary descriptor, typically the airport name.
    pub secondary_label: String,

    /// Short unique code ("CDG").
    pub code: String,

    /// Country or region the place belongs to.
    pub region: String,
}

impl Place {
    pub fn new(
        primary_label: impl Into<String>,
        secondary_label: impl Into<String>,
        code: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            primary_label: primary_label.into(),
            secondary_label: secondary_label.into(),
            code: code.into(),
            region: region.into(),
        }
    }

    /// Canonical display form used when a place is committed from a
    /// selector: primary label plus code.
    pub fn display_value(&self) -> String {
        format!("{} ({})", self.primary_label, self.code)
    }

    fn matches_substring(&self, needle: &str) -> bool {
        self.primary_label.to_lowercase().contains(needle)
            || self.secondary_label.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
            || self.region.to_lowercase().contains(needle)
    }
}

/// An immutable collection of places.
#[derive(Debug, Clone)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    /// Build a catalog from an explicit collection (tests, custom datasets).
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    /// The built-in destination dataset, initialized once per process.
    pub fn builtin() -> &'static Catalog {
        catalog::builtin()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Ranked lookup.
    ///
    /// The query is trimmed and matched case-insensitively. Results are the
    /// three tiers concatenated in priority order, truncated to `limit`.
    /// Empty or whitespace-only queries return nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Place> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut selected = vec![false; self.places.len()];
        let mut out = Vec::new();

        // Tier 1: exact code match.
        for (i, place) in self.places.iter().enumerate() {
            if place.code.to_lowercase() == needle {
                selected[i] = true;
                out.push(place);
            }
        }

        // Tier 2: primary-label prefix.
        for (i, place) in self.places.iter().enumerate() {
            if !selected[i] && place.primary_label.to_lowercase().starts_with(&needle) {
                selected[i] = true;
                out.push(place);
            }
        }

        // Tier 3: substring anywhere.
        for (i, place) in self.places.iter().enumerate() {
            if !selected[i] && place.matches_substring(&needle) {
                selected[i] = true;
                out.push(place);
            }
        }

        out.truncate(limit);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            Place::new("Paris", "Charles de Gaulle Airport", "CDG", "France"),
            Place::new("Paris", "Orly Airport", "ORY", "France"),
            Place::new("Parma", "Giuseppe Verdi Airport", "PMF", "Italy"),
            Place::new("London", "Heathrow Airport", "LHR", "United Kingdom"),
            Place::new("Lyon", "Saint-Exupery Airport", "LYS", "France"),
        ])
    }

    #[test]
    fn test_empty_and_whitespace_queries_return_nothing() {
        let catalog = test_catalog();
        assert!(catalog.search("", 8).is_empty());
        assert!(catalog.search("   ", 8).is_empty());
        assert!(catalog.search("\t\n", 8).is_empty());
    }

    #[test]
    fn test_exact_code_ranks_first() {
        let catalog = test_catalog();

        // "LHR" also substring-matches "London Heathrow", but the code tier wins.
        let results = catalog.search("lhr", 8);
        assert_eq!(results[0].code, "LHR");

        // Any casing of the code works.
        let results = catalog.search("Cdg", 8);
        assert_eq!(results[0].code, "CDG");
    }

    #[test]
    fn test_prefix_tier_before_substring_tier() {
        let catalog = test_catalog();

        // "par" prefixes Paris (x2) and Parma; nothing else matches.
        let results = catalog.search("par", 8);
        let codes: Vec<&str> = results.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["CDG", "ORY", "PMF"]);
    }

    #[test]
    fn test_substring_matches_every_field() {
        let catalog = test_catalog();

        // Region match only.
        let results = catalog.search("france", 8);
        let codes: Vec<&str> = results.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["CDG", "ORY", "LYS"]);

        // Secondary-label match only.
        let results = catalog.search("heathrow", 8);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code, "LHR");
    }

    #[test]
    fn test_tiers_preserve_catalog_order() {
        let catalog = test_catalog();

        // Every entry matches via its secondary label; the result order
        // must be the catalog's.
        let results = catalog.search("airport", 8);
        let codes: Vec<&str> = results.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["CDG", "ORY", "PMF", "LHR", "LYS"]);
    }

    #[test]
    fn test_no_duplicates_across_tiers() {
        // "ORY" qualifies for the code tier and the substring tier; it must
        // appear exactly once.
        let catalog = test_catalog();
        let results = catalog.search("ory", 8);
        let ory_count = results.iter().filter(|p| p.code == "ORY").count();
        assert_eq!(ory_count, 1);
    }

    #[test]
    fn test_limit_truncates_after_concatenation() {
        let catalog = test_catalog();

        let results = catalog.search("par", 2);
        let codes: Vec<&str> = results.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["CDG", "ORY"]);

        assert!(catalog.search("par", 0).is_empty());
    }

    #[test]
    fn test_query_is_trimmed() {
        let catalog = test_catalog();
        let results = catalog.search("  lhr  ", 8);
        assert_eq!(results[0].code, "LHR");
    }

    #[test]
    fn test_display_value() {
        let place = Place::new("Paris", "Charles de Gaulle Airport", "CDG", "France");
        assert_eq!(place.display_value(), "Paris (CDG)");
    }

    #[test]
    fn test_builtin_catalog_is_loaded_and_stable() {
        let catalog = Catalog::builtin();
        assert!(!catalog.is_empty());

        // Same instance on every call.
        assert!(std::ptr::eq(catalog, Catalog::builtin()));

        // Codes are unique per place.
        let mut codes: Vec<&str> = catalog.places().iter().map(|p| p.code.as_str()).collect();
        codes.sort_unstable();
        let before = codes.len();
        codes.dedup();
        assert_eq!(codes.len(), before);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_label() -> impl Strategy<Value = String> {
            "[a-zA-Z]{1,8}"
        }

        fn arb_catalog() -> impl Strategy<Value = Catalog> {
            proptest::collection::vec((arb_label(), arb_label(), "[A-Z]{3}", arb_label()), 0..20).prop_map(
                |entries| {
                    Catalog::new(
                        entries
                            .into_iter()
                            .map(|(primary, secondary, code, region)| Place::new(primary, secondary, code, region))
                            .collect(),
                    )
                },
            )
        }

        proptest! {
            #[test]
            fn prop_results_respect_limit(catalog in arb_catalog(), query in "[a-zA-Z]{0,4}", limit in 0usize..10) {
                let results = catalog.search(&query, limit);
                prop_assert!(results.len() <= limit);
            }

            #[test]
            fn prop_no_duplicate_entries(catalog in arb_catalog(), query in "[a-zA-Z]{1,4}") {
                let results = catalog.search(&query, 100);
                let mut seen = std::collections::HashSet::new();
                for place in &results {
                    prop_assert!(seen.insert(*place as *const Place));
                }
            }

            #[test]
            fn prop_code_query_ranks_that_place_first(catalog in arb_catalog()) {
                for place in catalog.places() {
                    let results = catalog.search(&place.code.to_lowercase(), 100);
                    prop_assert!(!results.is_empty());
                    // Codes may repeat across generated places; the first
                    // result must carry the queried code.
                    prop_assert_eq!(&results[0].code, &place.code);
                }
            }
        }
    }
}
