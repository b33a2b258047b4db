//! # Match Diagnostics Module
//!
//! Optional statistics collector for the catalog matcher, used for offline
//! quality measurement (benchmark runs, threshold tuning). It never feeds
//! back into matching behavior, and production callers simply do not attach
//! one.
//!
//! The collector is explicit state owned by whoever wants the numbers, not
//! an ambient global counter.

use serde::Serialize;

/// One below-threshold rejection, with how often it recurred.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionRecord {
    /// The normalized expression that failed to match
    pub expression: String,
    /// The best-scoring candidate that was nevertheless rejected
    pub candidate: String,
    /// The rejected score
    pub score: f64,
    /// How many times this (expression, candidate) pair was rejected
    pub count: u32,
}

/// Counters and score history for matcher diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchStats {
    /// Total lookups, cache hits included
    lookups: u64,
    /// Lookups answered from the cache without a catalog scan
    cache_hits: u64,
    /// Lookups whose best score fell below the rejection threshold
    match_failures: u64,
    /// Below-threshold cases, keyed by (expression, candidate)
    rejections: Vec<RejectionRecord>,
    /// Every best-score observed during catalog scans
    score_history: Vec<f64>,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&mut self) {
        self.lookups += 1;
    }

    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    pub fn record_score(&mut self, score: f64) {
        self.score_history.push(score);
    }

    pub fn record_rejection(&mut self, expression: &str, candidate: &str, score: f64) {
        self.match_failures += 1;
        if let Some(record) = self
            .rejections
            .iter_mut()
            .find(|r| r.expression == expression && r.candidate == candidate)
        {
            record.count += 1;
            return;
        }
        self.rejections.push(RejectionRecord {
            expression: expression.to_string(),
            candidate: candidate.to_string(),
            score,
            count: 1,
        });
    }

    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    pub fn match_failures(&self) -> u64 {
        self.match_failures
    }

    pub fn rejections(&self) -> &[RejectionRecord] {
        &self.rejections
    }

    pub fn score_history(&self) -> &[f64] {
        &self.score_history
    }
}
