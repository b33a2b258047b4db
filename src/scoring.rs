//! # Fuzzy Scorer Module
//!
//! Token-set alignment scoring between a simplified ingredient expression
//! and one catalog candidate, on a 0-100 scale.
//!
//! Both strings are tokenized on punctuation and whitespace and the token
//! sequences are reversed, so the last word of the original phrase (the
//! head noun, usually) is compared first and carries the most weight. The
//! weights are a softmax over a strictly decreasing integer sequence, and
//! the raw weighted sum is scaled by a coverage modifier: the fraction of
//! candidate tokens that found any match at all. Candidates only partially
//! represented in the expression are penalized regardless of how well their
//! individual tokens scored.
//!
//! The function is asymmetric: expression and candidate play different
//! roles, and the asymmetry is part of the contract.

use log::trace;

/// Token-pair ratios below this cutoff count as zero.
pub const SIMILARITY_CUTOFF: f64 = 80.0;

/// Split on punctuation and whitespace, dropping empty fragments.
fn tokenize(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Edit-distance similarity of two tokens as a 0-100 ratio, with ratios
/// under [`SIMILARITY_CUTOFF`] treated as zero.
fn token_ratio(a: &str, b: &str) -> f64 {
    let ratio = strsim::normalized_levenshtein(a, b) * 100.0;
    if ratio < SIMILARITY_CUTOFF {
        0.0
    } else {
        ratio
    }
}

/// Softmax over the strictly decreasing sequence `n-1, n-2, ..., 0`.
/// Weights sum to 1; index 0 gets the largest weight.
fn decay_weights(n: usize) -> Vec<f64> {
    let exps: Vec<f64> = (0..n).map(|i| ((n - 1 - i) as f64).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Score a candidate catalog entry against an expression.
///
/// Returns 0 when no tokens match; approaches 100 when every candidate
/// token matches a distinct expression token exactly.
///
/// # Examples
///
/// ```rust
/// use ingredient_matcher::scoring::score;
///
/// assert!(score("1 2 cup half-and-half", "half and half") > 99.0);
/// assert_eq!(score("2 cups sugar", "shrimp"), 0.0);
/// ```
pub fn score(expression: &str, candidate: &str) -> f64 {
    let mut expr_tokens = tokenize(expression);
    let mut cand_tokens = tokenize(candidate);
    expr_tokens.reverse();
    cand_tokens.reverse();

    let n = cand_tokens.len();
    if n == 0 || expr_tokens.is_empty() {
        return 0.0;
    }

    let weights = decay_weights(n);
    let mut remaining = expr_tokens;
    let mut total = 0.0;
    let mut matched = 0usize;

    for (i, cand_token) in cand_tokens.iter().enumerate() {
        let mut best_ratio = 0.0;
        let mut best_index = None;

        for (j, expr_token) in remaining.iter().enumerate() {
            let ratio = token_ratio(expr_token, cand_token);
            if ratio > best_ratio {
                best_ratio = ratio;
                best_index = Some(j);
            }
        }

        if let Some(j) = best_index {
            // Each expression token may back at most one candidate token.
            remaining.remove(j);
            total += weights[i] * best_ratio;
            matched += 1;
        }
    }

    let coverage = matched as f64 / n as f64;
    let final_score = total * coverage;
    trace!(
        "score('{}', '{}') = {:.2} (matched {}/{})",
        expression,
        candidate,
        final_score,
        matched,
        n
    );
    final_score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_single_token() {
        assert!((score("flour", "flour") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_overlap_is_zero() {
        assert_eq!(score("2 cups sugar", "shrimp"), 0.0);
    }

    #[test]
    fn test_below_cutoff_ratios_are_zero() {
        // "blueberries" vs "blueberry" is under the 80 cutoff; without
        // singularization upstream the tokens do not align.
        assert_eq!(score("frozen blueberries", "blueberry"), 0.0);
        assert!(score("frozen blueberry", "blueberry") > 70.0);
    }

    #[test]
    fn test_noise_tokens_do_not_hurt() {
        let clean = score("flour", "flour");
        let noisy = score("1 1 4 cups all-purpose flour", "flour");
        assert!((clean - noisy).abs() < 1e-9);
    }

    #[test]
    fn test_coverage_penalizes_partial_candidates() {
        // Only one of two candidate tokens is present in the expression.
        let partial = score("2 cups flour", "bread flour");
        let full = score("2 cups flour", "flour");
        assert!(partial < full);
        assert!(partial > 0.0);
    }

    #[test]
    fn test_trailing_tokens_weigh_most() {
        // The head noun sits at the end of the phrase; a candidate matching
        // it outscores one matching only an earlier token.
        let head = score("cream cheese", "cheese spread");
        let tail = score("cream cheese", "spread cheese");
        assert!(tail > head);
    }

    #[test]
    fn test_asymmetry() {
        let forward = score("2 pounds chicken breast half", "chicken");
        let backward = score("chicken", "2 pounds chicken breast half");
        assert!(forward > backward);
    }

    #[test]
    fn test_expression_tokens_not_reused() {
        // One "half" in the expression cannot satisfy all three candidate
        // tokens.
        let reused = score("half", "half half half");
        assert!(reused < 50.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(score("", "flour"), 0.0);
        assert_eq!(score("flour", ""), 0.0);
        assert_eq!(score("", ""), 0.0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for n in 1..8 {
            let sum: f64 = decay_weights(n).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }
}
