//! # Grammar Extractor Module
//!
//! This module isolates the ingredient-name span of a phrase by parsing a
//! small quantity-unit-name grammar, e.g. `"1 1/4 cups all-purpose flour"`
//! reduces to `"all-purpose flour"`.
//!
//! Five lexical token kinds are recognized (FRACTION, NUMBER, UNIT,
//! WHITESPACE, and WORD) plus a catch-all PREPNOTE absorbing any trailing
//! free text ("or to taste", comma qualifiers, parenthetical remnants).
//! Unit words are matched longest-first so plural forms are not shadowed by
//! their singular prefixes.
//!
//! A phrase that fits none of the productions yields `None`. That is an
//! expected outcome for malformed or quantity-less input, not an error:
//! callers fall back to treating the raw text as the name or record a parse
//! failure, per their own policy.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Closed list of measurement words the grammar recognizes.
const UNITS: &[&str] = &[
    "teaspoon",
    "tablespoon",
    "cup",
    "package",
    "pound",
    "dash",
    "ounce",
];

/// Pluralize a unit word (`dash` -> `dashes`, `cup` -> `cups`).
fn pluralize(unit: &str) -> String {
    if unit.ends_with("sh") || unit.ends_with("ch") || unit.ends_with('s') || unit.ends_with('x')
    {
        format!("{unit}es")
    } else {
        format!("{unit}s")
    }
}

lazy_static! {
    /// Unit alternation, singular and plural forms, longest-first.
    static ref UNIT_PATTERN: Regex = {
        let mut forms: Vec<String> = UNITS.iter().map(|u| (*u).to_string()).collect();
        forms.extend(UNITS.iter().map(|u| pluralize(u)));
        forms.sort_by(|a, b| b.len().cmp(&a.len()));
        Regex::new(&format!("^(?:{})", forms.join("|")))
            .expect("Unit pattern should be valid")
    };
    /// Mixed or plain fraction: "1 1/2", "3/4"
    static ref FRACTION_PATTERN: Regex =
        Regex::new(r"^(?:[0-9]+\s)?[1-9]/[1-9]").expect("Fraction pattern should be valid");
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^[1-9][0-9]*").expect("Number pattern should be valid");
    static ref WHITESPACE_PATTERN: Regex =
        Regex::new(r"^\s+").expect("Whitespace pattern should be valid");
    /// Free text, hyphens and apostrophes included; stops at commas/digits.
    static ref WORD_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z\-\s'®]+").expect("Word pattern should be valid");
    /// Trailing prep note, commas and digits allowed.
    static ref PREPNOTE_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z\-\s,'®0-9]+$").expect("Prepnote pattern should be valid");
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Fraction,
    Number,
    Unit,
    Whitespace,
    Word(String),
    Prepnote,
}

/// Tokenize a phrase, or `None` on an illegal character sequence.
///
/// Token priority mirrors the production grammar: UNIT beats WORD at the
/// same position, FRACTION beats NUMBER. Once the first WORD has been
/// consumed, any remaining text must fit a single PREPNOTE.
fn lex(text: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(m) = FRACTION_PATTERN.find(rest) {
            tokens.push(Token::Fraction);
            rest = &rest[m.end()..];
        } else if let Some(m) = NUMBER_PATTERN.find(rest) {
            tokens.push(Token::Number);
            rest = &rest[m.end()..];
        } else if let Some(m) = UNIT_PATTERN.find(rest) {
            tokens.push(Token::Unit);
            rest = &rest[m.end()..];
        } else if let Some(m) = WHITESPACE_PATTERN.find(rest) {
            tokens.push(Token::Whitespace);
            rest = &rest[m.end()..];
        } else if !matches!(tokens.last(), Some(Token::Word(_) | Token::Prepnote)) {
            if let Some(m) = WORD_PATTERN.find(rest) {
                tokens.push(Token::Word(m.as_str().trim_end().to_string()));
                rest = &rest[m.end()..];
            } else if PREPNOTE_PATTERN.is_match(rest) {
                tokens.push(Token::Prepnote);
                rest = "";
            } else {
                trace!("Illegal character sequence at '{}'", rest);
                return None;
            }
        } else if PREPNOTE_PATTERN.is_match(rest) {
            tokens.push(Token::Prepnote);
            rest = "";
        } else {
            trace!("Illegal character sequence at '{}'", rest);
            return None;
        }
    }

    Some(tokens)
}

/// Extract the ingredient-name span from a phrase, per the production
/// rules, in order of preference for the leading quantity:
///
/// 1. `FRACTION WHITESPACE UNIT WHITESPACE WORD [PREPNOTE]`
/// 2. `FRACTION WHITESPACE WORD [PREPNOTE]`
/// 3. `NUMBER WHITESPACE UNIT WHITESPACE WORD [PREPNOTE]`
/// 4. `NUMBER WHITESPACE WORD [PREPNOTE]`
/// 5. `WORD` alone (quantity-less input)
///
/// A PREPNOTE suffix is discarded without altering the extracted name.
///
/// # Examples
///
/// ```rust
/// use ingredient_matcher::grammar::extract_name;
///
/// assert_eq!(
///     extract_name("1 1/4 cups all-purpose flour"),
///     Some("all-purpose flour".to_string())
/// );
/// assert_eq!(extract_name("1/2 cup frozen blueberries, thawed"),
///     Some("frozen blueberries".to_string()));
/// assert_eq!(extract_name("?????"), None);
/// ```
pub fn extract_name(text: &str) -> Option<String> {
    let mut tokens = lex(text)?;

    if tokens.last() == Some(&Token::Prepnote) {
        tokens.pop();
    }

    let name = match tokens.as_slice() {
        [Token::Fraction, Token::Whitespace, Token::Unit, Token::Whitespace, Token::Word(w)] => w,
        [Token::Fraction, Token::Whitespace, Token::Word(w)] => w,
        [Token::Number, Token::Whitespace, Token::Unit, Token::Whitespace, Token::Word(w)] => w,
        [Token::Number, Token::Whitespace, Token::Word(w)] => w,
        [Token::Word(w)] => w,
        _ => {
            trace!("No production matched token sequence for '{}'", text);
            return None;
        }
    };

    Some(name.trim().to_string())
}
