//! # Catalog Matcher Module
//!
//! Finds the closest catalog entry for a simplified ingredient expression.
//! The matcher scans every matchable name (canonical entries and their
//! aliases), keeps the best fuzzy score, rejects weak winners below a
//! threshold, and resolves the surviving winner through the alias table to
//! its canonical form.
//!
//! Results are memoized per distinct expression in a cache owned by the
//! matcher instance. The catalog is immutable for the process lifetime, so
//! entries are never invalidated. A repeat lookup performs no catalog scan,
//! observable through [`CatalogMatcher::scan_count`].

use crate::catalog::Catalog;
use crate::match_stats::MatchStats;
use crate::scoring::score;
use log::{debug, trace};
use std::collections::HashMap;

/// Scores within this distance are considered tied and fall through to the
/// length tie-break.
const SCORE_EPSILON: f64 = 1e-9;

/// Tunables for the matcher.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Best scores below this value yield no match
    pub rejection_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            rejection_threshold: 20.0,
        }
    }
}

/// Fuzzy matcher over a borrowed, read-only catalog.
///
/// Each matcher owns its private cache and (optionally) a diagnostics
/// collector; the catalog itself can be shared by reference across any
/// number of matcher instances.
pub struct CatalogMatcher<'a> {
    catalog: &'a Catalog,
    config: MatcherConfig,
    cache: HashMap<String, Option<String>>,
    stats: Option<MatchStats>,
    scans: u64,
}

impl<'a> CatalogMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_config(catalog, MatcherConfig::default())
    }

    pub fn with_config(catalog: &'a Catalog, config: MatcherConfig) -> Self {
        Self {
            catalog,
            config,
            cache: HashMap::new(),
            stats: None,
            scans: 0,
        }
    }

    /// Attach a diagnostics collector. Matching behavior is unaffected.
    pub fn attach_stats(&mut self, stats: MatchStats) {
        self.stats = Some(stats);
    }

    /// Collected diagnostics, if a collector is attached.
    pub fn stats(&self) -> Option<&MatchStats> {
        self.stats.as_ref()
    }

    /// Detach and return the diagnostics collector.
    pub fn take_stats(&mut self) -> Option<MatchStats> {
        self.stats.take()
    }

    /// Number of full catalog scans performed so far.
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    /// Find the canonical catalog entry closest to `expression`, or `None`
    /// when the best score falls below the rejection threshold.
    ///
    /// A `None` is an expected outcome ("no confident match"), not an
    /// error. Identical inputs always return the identical cached output.
    pub fn find_closest_match(&mut self, expression: &str) -> Option<String> {
        if let Some(stats) = self.stats.as_mut() {
            stats.record_lookup();
        }

        if let Some(cached) = self.cache.get(expression) {
            trace!("Cache hit for '{}'", expression);
            if let Some(stats) = self.stats.as_mut() {
                stats.record_cache_hit();
            }
            return cached.clone();
        }

        let result = self.scan(expression);
        self.cache.insert(expression.to_string(), result.clone());
        result
    }

    fn scan(&mut self, expression: &str) -> Option<String> {
        self.scans += 1;

        let mut best_score = f64::NEG_INFINITY;
        let mut best_entry: Option<&str> = None;

        for candidate in self.catalog.match_candidates() {
            let candidate_score = score(expression, candidate);

            let improves = match best_entry {
                None => true,
                // Ties go to the longer, more specific name.
                Some(current) => {
                    candidate_score > best_score + SCORE_EPSILON
                        || ((candidate_score - best_score).abs() <= SCORE_EPSILON
                            && candidate.len() > current.len())
                }
            };
            if improves {
                best_score = candidate_score;
                best_entry = Some(candidate);
            }
        }

        let best_entry = best_entry?;
        if let Some(stats) = self.stats.as_mut() {
            stats.record_score(best_score);
        }

        if best_score < self.config.rejection_threshold {
            debug!(
                "No confident match for '{}': best was '{}' at {:.2}",
                expression, best_entry, best_score
            );
            if let Some(stats) = self.stats.as_mut() {
                stats.record_rejection(expression, best_entry, best_score);
            }
            return None;
        }

        let canonical = self
            .catalog
            .resolve_alias(best_entry)
            .unwrap_or(best_entry)
            .to_string();
        debug!(
            "Matched '{}' -> '{}' (via '{}', score {:.2})",
            expression, canonical, best_entry, best_score
        );
        Some(canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_catalog() -> Catalog {
        let entries = vec![
            ("flour".to_string(), "baking".to_string()),
            ("chicken".to_string(), "meat".to_string()),
            ("chicken breast".to_string(), "meat".to_string()),
            ("shrimp".to_string(), "seafood".to_string()),
            ("hot sauce".to_string(), "condiments".to_string()),
        ];
        let aliases = vec![(
            "hot pepper sauce".to_string(),
            "hot sauce".to_string(),
        )];
        Catalog::from_entries(entries, aliases).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);

        assert_eq!(
            matcher.find_closest_match("flour"),
            Some("flour".to_string())
        );
    }

    #[test]
    fn test_rejection_threshold() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);

        assert_eq!(matcher.find_closest_match("mystery goop"), None);
    }

    #[test]
    fn test_tie_break_prefers_longer_name() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);

        // Both "chicken" and "chicken breast" fully match; the longer,
        // more specific entry wins.
        assert_eq!(
            matcher.find_closest_match("2 pounds boneless chicken breast half"),
            Some("chicken breast".to_string())
        );
    }

    #[test]
    fn test_alias_resolved_to_canonical() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);

        assert_eq!(
            matcher.find_closest_match("hot pepper sauce"),
            Some("hot sauce".to_string())
        );
    }

    #[test]
    fn test_cache_skips_rescans() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);

        let first = matcher.find_closest_match("1 cup flour");
        assert_eq!(matcher.scan_count(), 1);
        let second = matcher.find_closest_match("1 cup flour");
        assert_eq!(matcher.scan_count(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_results_cached_too() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);

        assert_eq!(matcher.find_closest_match("mystery goop"), None);
        assert_eq!(matcher.find_closest_match("mystery goop"), None);
        assert_eq!(matcher.scan_count(), 1);
    }

    #[test]
    fn test_raising_threshold_only_removes_matches() {
        let catalog = fixture_catalog();
        let expressions = ["1 cup flour", "shrimp", "mystery goop", "chicken wings"];

        for expr in expressions {
            let mut lenient =
                CatalogMatcher::with_config(&catalog, MatcherConfig { rejection_threshold: 20.0 });
            let mut strict =
                CatalogMatcher::with_config(&catalog, MatcherConfig { rejection_threshold: 60.0 });

            let low = lenient.find_closest_match(expr);
            let high = strict.find_closest_match(expr);
            if high.is_some() {
                assert_eq!(low, high, "raising the threshold created a match for '{expr}'");
            }
        }
    }

    #[test]
    fn test_stats_record_rejections() {
        let catalog = fixture_catalog();
        let mut matcher = CatalogMatcher::new(&catalog);
        matcher.attach_stats(MatchStats::new());

        matcher.find_closest_match("mystery goop");
        matcher.find_closest_match("flour");
        matcher.find_closest_match("flour");

        let stats = matcher.stats().unwrap();
        assert_eq!(stats.lookups(), 3);
        assert_eq!(stats.cache_hits(), 1);
        assert_eq!(stats.match_failures(), 1);
        assert_eq!(stats.rejections()[0].expression, "mystery goop");
        assert_eq!(stats.score_history().len(), 2);
    }

    #[test]
    fn test_empty_catalog_never_matches() {
        let catalog = Catalog::from_entries(vec![], vec![]).unwrap();
        let mut matcher = CatalogMatcher::new(&catalog);

        assert_eq!(matcher.find_closest_match("flour"), None);
    }
}
