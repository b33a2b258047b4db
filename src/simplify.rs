//! # Phrase Simplifier Module
//!
//! This module reduces a raw ingredient phrase to the tokens that actually
//! name the ingredient, so the fuzzy matcher works on signal instead of
//! noise. Simplification is deterministic and side-effect free.
//!
//! ## Steps
//!
//! - Remove parenthetical asides, e.g. `"(16 ounce)"`, including a single
//!   preceding space
//! - Lowercase and trim
//! - Drop adposition-headed clause tails, e.g. `"in shell"` inside
//!   `"shrimp in shell"`
//! - Singularize the trailing noun of each comma-delimited clause
//!   (`"raspberries"` -> `"raspberry"`); a no-op when the word reports no
//!   singular form (`"rice"` stays `"rice"`)
//! - Join the surviving tokens with single spaces, preserving order

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    /// A parenthetical is anything from `(` to the next `)`, optionally
    /// preceded by one space.
    static ref PARENTHETICAL: Regex =
        Regex::new(r" ?\([^)]*\)").expect("Parenthetical pattern should be valid");
}

/// Adpositions that head a removable clause tail. `of` is deliberately
/// absent: it appears inside catalog names like "cream of tartar". Bare
/// `to` is absent as well since it occurs inside quantity ranges.
const CLAUSE_ADPOSITIONS: &[&str] = &["in", "with", "for", "from", "per", "on", "at"];

/// Uninflectable words that end in `s` but have no singular form.
const UNINFLECTABLE: &[&str] = &["couscous", "hummus", "molasses", "asparagus", "swiss"];

/// Irregular plural -> singular pairs the suffix rules get wrong.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("halves", "half"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("knives", "knife"),
    ("cookies", "cookie"),
];

/// Remove every parenthetical aside, content included.
pub fn remove_parentheticals(raw: &str) -> String {
    PARENTHETICAL.replace_all(raw, "").into_owned()
}

/// Report the singular form of a plural noun, or `None` when the word is
/// not recognizably plural.
///
/// Rule cascade: irregulars table, `ies` -> `y`, `oes` -> `o`, then a plain
/// trailing `s` (guarded against `ss`/`us`/`is` endings such as
/// "skinless" or "citrus").
pub fn singular_noun(word: &str) -> Option<String> {
    for (plural, singular) in IRREGULAR_PLURALS {
        if word == *plural {
            return Some((*singular).to_string());
        }
    }
    if UNINFLECTABLE.contains(&word) {
        return None;
    }
    if word.len() < 3 || !word.ends_with('s') {
        return None;
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    if word.len() > 4 && word.ends_with("ies") {
        return Some(format!("{}y", &word[..word.len() - 3]));
    }
    if word.len() > 4 && word.ends_with("oes") {
        return Some(word[..word.len() - 2].to_string());
    }
    Some(word[..word.len() - 1].to_string())
}

/// Singularize a word, returning it unchanged when no singular form is
/// reported.
pub fn singularize(word: &str) -> String {
    singular_noun(word).unwrap_or_else(|| word.to_string())
}

/// Simplify a raw ingredient phrase.
///
/// # Examples
///
/// ```rust
/// use ingredient_matcher::simplify::simplify;
///
/// assert_eq!(
///     simplify("24 large shrimp in shell (21 to 25 per lb), peeled and deveined"),
///     "24 large shrimp peeled and deveined"
/// );
/// assert_eq!(simplify("Fresh raspberries"), "fresh raspberry");
/// ```
pub fn simplify(raw: &str) -> String {
    let text = remove_parentheticals(raw).trim().to_lowercase();
    let mut kept: Vec<String> = Vec::new();

    for clause in text.split(',') {
        let mut tokens: Vec<&str> = clause.split_whitespace().collect();

        // An adposition heads its clause tail; drop both.
        if let Some(pos) = tokens.iter().position(|t| CLAUSE_ADPOSITIONS.contains(t)) {
            tokens.truncate(pos);
        }
        if tokens.is_empty() {
            continue;
        }

        let mut words: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        if let Some(last) = words.last_mut() {
            if let Some(singular) = singular_noun(last) {
                *last = singular;
            }
        }
        kept.push(words.join(" "));
    }

    let simplified = kept.join(" ");
    trace!("Simplified '{}' -> '{}'", raw, simplified);
    simplified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_parentheticals() {
        assert_eq!(
            remove_parentheticals("1/2 (16 ounce) package linguine pasta"),
            "1/2 package linguine pasta"
        );
        assert_eq!(remove_parentheticals("no parens here"), "no parens here");
        assert_eq!(remove_parentheticals("a (b) c (d)"), "a c");
    }

    #[test]
    fn test_singular_noun_regular() {
        assert_eq!(singular_noun("eggs"), Some("egg".to_string()));
        assert_eq!(singular_noun("cups"), Some("cup".to_string()));
        assert_eq!(singular_noun("raspberries"), Some("raspberry".to_string()));
        assert_eq!(singular_noun("blueberries"), Some("blueberry".to_string()));
        assert_eq!(singular_noun("potatoes"), Some("potato".to_string()));
        assert_eq!(singular_noun("tomatoes"), Some("tomato".to_string()));
    }

    #[test]
    fn test_singular_noun_irregular() {
        assert_eq!(singular_noun("halves"), Some("half".to_string()));
        assert_eq!(singular_noun("leaves"), Some("leaf".to_string()));
        assert_eq!(singular_noun("cookies"), Some("cookie".to_string()));
    }

    #[test]
    fn test_singular_noun_no_op() {
        assert_eq!(singular_noun("rice"), None);
        assert_eq!(singular_noun("skinless"), None);
        assert_eq!(singular_noun("couscous"), None);
        assert_eq!(singular_noun("citrus"), None);
        assert_eq!(singular_noun(""), None);
    }

    #[test]
    fn test_singularize_passthrough() {
        assert_eq!(singularize("rice"), "rice");
        assert_eq!(singularize("eggs"), "egg");
    }

    #[test]
    fn test_simplify_drops_adposition_tail() {
        assert_eq!(simplify("shrimp in shell"), "shrimp");
        assert_eq!(simplify("chicken with bones"), "chicken");
    }

    #[test]
    fn test_simplify_clause_wise_singularization() {
        // Trailing noun of each comma clause is singularized, so the plural
        // before the comma is still caught.
        assert_eq!(
            simplify("1/2 cup frozen blueberries, thawed"),
            "1/2 cup frozen blueberry thawed"
        );
        assert_eq!(
            simplify("2 pounds skinless, boneless chicken breast halves"),
            "2 pounds skinless boneless chicken breast half"
        );
    }

    #[test]
    fn test_simplify_lowercases_and_trims() {
        assert_eq!(simplify("  Fresh Raspberries  "), "fresh raspberry");
    }

    #[test]
    fn test_simplify_keeps_hyphenated_names() {
        assert_eq!(simplify("1/2 cup half-and-half"), "1/2 cup half-and-half");
    }

    #[test]
    fn test_simplify_empty_input() {
        assert_eq!(simplify(""), "");
        assert_eq!(simplify("   "), "");
        assert_eq!(simplify("(only an aside)"), "");
    }
}
