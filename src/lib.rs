//! # Ingredient Matcher
//!
//! Normalizes free-text ingredient phrases harvested from recipe pages
//! (e.g. "1/2 cup frozen blueberries, thawed") into canonical ingredient
//! names drawn from a fixed catalog (e.g. "blueberry"), so downstream
//! consumers can aggregate recipes by ingredient.
//!
//! The pipeline: ignore-list filtering, phrase simplification (or grammar
//! extraction), fuzzy catalog matching with a rejection threshold, alias
//! resolution, and per-parser memoization.

pub mod catalog;
pub mod grammar;
pub mod ingredient_parser;
pub mod match_stats;
pub mod matcher;
pub mod scoring;
pub mod simplify;
