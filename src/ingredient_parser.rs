//! # Ingredient Parser
//!
//! The façade external collaborators call: raw scraped phrase in, canonical
//! catalog ingredient (or no match) out.
//!
//! ## Pipeline
//!
//! 1. Ignore-list check: phrases containing an intentionally uncataloged
//!    ingredient ("salt", "water", ...) return `None` immediately
//! 2. Name extraction: a [`NameExtractor`] strategy isolates the candidate
//!    ingredient name: phrase simplification by default, the
//!    quantity-stripping grammar as the selectable alternative
//! 3. Catalog matching: fuzzy scan, rejection threshold, alias resolution,
//!    memoized per parser instance
//!
//! ## Usage
//!
//! ```rust
//! use ingredient_matcher::catalog::Catalog;
//! use ingredient_matcher::ingredient_parser::IngredientParser;
//!
//! let catalog = Catalog::from_entries(
//!     vec![("flour".to_string(), "baking".to_string())],
//!     vec![],
//! )?;
//! let mut parser = IngredientParser::new(&catalog);
//!
//! assert_eq!(parser.parse("1 1/4 cups all-purpose flour"), Some("flour".to_string()));
//! assert_eq!(parser.parse("1/2 teaspoon salt"), None); // ignore-listed
//! # Ok::<(), ingredient_matcher::catalog::CatalogError>(())
//! ```

use crate::catalog::Catalog;
use crate::grammar;
use crate::match_stats::MatchStats;
use crate::matcher::{CatalogMatcher, MatcherConfig};
use crate::simplify::{remove_parentheticals, simplify, singularize};
use log::{debug, info};

/// Default ignore list: ingredients excluded from the catalog on purpose,
/// regardless of how well they would match.
const DEFAULT_IGNORE_LIST: &[&str] = &["salt", "black pepper", "water", "skewers", "coloring"];

/// A strategy for isolating the candidate ingredient name from raw text.
///
/// `None` means the strategy could not find a name span; the parser falls
/// back to the simplified raw text.
pub trait NameExtractor {
    fn extract(&self, raw: &str) -> Option<String>;
}

/// Default strategy: full phrase simplification (parentheticals, clause
/// tails, singularization), letting the fuzzy scorer work on the whole
/// simplified phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifyExtractor;

impl NameExtractor for SimplifyExtractor {
    fn extract(&self, raw: &str) -> Option<String> {
        let simplified = simplify(raw);
        if simplified.is_empty() {
            None
        } else {
            Some(simplified)
        }
    }
}

/// Alternative strategy: parse the quantity-unit-name grammar and match on
/// the isolated name span only.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarNameExtractor;

impl NameExtractor for GrammarNameExtractor {
    fn extract(&self, raw: &str) -> Option<String> {
        let cleaned = remove_parentheticals(raw);
        let name = grammar::extract_name(cleaned.trim())?;
        let name = name.to_lowercase();

        // Singularize the trailing word of the extracted span.
        let mut words: Vec<String> = name.split_whitespace().map(str::to_string).collect();
        if let Some(last) = words.pop() {
            words.push(singularize(&last));
        }
        let name = words.join(" ");
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Configuration for the parser façade.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Substrings that short-circuit parsing to `None`
    pub ignore_list: Vec<String>,
    /// Matcher tunables (rejection threshold)
    pub matcher: MatcherConfig,
    /// Attach a diagnostics collector to the matcher
    pub collect_stats: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            ignore_list: DEFAULT_IGNORE_LIST.iter().map(|s| s.to_string()).collect(),
            matcher: MatcherConfig::default(),
            collect_stats: false,
        }
    }
}

/// Parses raw ingredient phrases into canonical catalog names.
///
/// Each parser owns a private result cache (and optional statistics); the
/// catalog is borrowed read-only and can back many parsers at once.
pub struct IngredientParser<'a> {
    matcher: CatalogMatcher<'a>,
    extractor: Box<dyn NameExtractor>,
    ignore_list: Vec<String>,
}

impl<'a> IngredientParser<'a> {
    /// Parser with the default simplification strategy.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::with_extractor(catalog, Box::new(SimplifyExtractor))
    }

    /// Parser with an explicit name-extraction strategy.
    pub fn with_extractor(catalog: &'a Catalog, extractor: Box<dyn NameExtractor>) -> Self {
        info!("Creating IngredientParser over {} catalog entries", catalog.len());
        Self {
            matcher: CatalogMatcher::new(catalog),
            extractor,
            ignore_list: DEFAULT_IGNORE_LIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parser with custom configuration and strategy.
    pub fn with_config(
        catalog: &'a Catalog,
        config: ParserConfig,
        extractor: Box<dyn NameExtractor>,
    ) -> Self {
        let mut matcher = CatalogMatcher::with_config(catalog, config.matcher);
        if config.collect_stats {
            matcher.attach_stats(MatchStats::new());
        }
        Self {
            matcher,
            extractor,
            ignore_list: config.ignore_list,
        }
    }

    /// Parse a raw ingredient phrase into a canonical catalog name.
    ///
    /// `None` covers three deliberate outcomes: the phrase contains an
    /// ignore-listed ingredient, the extractor found nothing usable and the
    /// fallback matched nothing, or the best catalog score fell below the
    /// rejection threshold. None of them is an error; callers skip or log
    /// and keep going.
    pub fn parse(&mut self, raw: &str) -> Option<String> {
        let lowered = raw.to_lowercase();
        if let Some(ignored) = self.ignore_list.iter().find(|i| lowered.contains(i.as_str())) {
            debug!("Ignoring '{}': contains '{}'", raw, ignored);
            return None;
        }

        // Grammar failures fall back to the simplified raw text.
        let name = match self.extractor.extract(raw) {
            Some(name) => name,
            None => {
                debug!("Extractor found no name in '{}', falling back", raw);
                simplify(raw)
            }
        };
        if name.is_empty() {
            return None;
        }

        self.matcher.find_closest_match(&name)
    }

    /// The underlying matcher, for scan counts and diagnostics.
    pub fn matcher(&self) -> &CatalogMatcher<'a> {
        &self.matcher
    }

    /// Detach the matcher's diagnostics collector, if any.
    pub fn take_stats(&mut self) -> Option<MatchStats> {
        self.matcher.take_stats()
    }
}
