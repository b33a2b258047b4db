//! Thin batch front-end: parse one ingredient phrase per input line against
//! a catalog directory and print the canonical match for each, followed by
//! a JSON diagnostics dump.
//!
//! Usage: `ingredient-matcher <catalog-dir> [phrases-file]`
//! (reads stdin when no phrases file is given)

use anyhow::{bail, Context, Result};
use ingredient_matcher::catalog::Catalog;
use ingredient_matcher::ingredient_parser::{IngredientParser, ParserConfig, SimplifyExtractor};
use log::{info, warn};
use std::env;
use std::fs;
use std::io::Read;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let catalog_dir = match args.get(1) {
        Some(dir) => dir,
        None => bail!("usage: ingredient-matcher <catalog-dir> [phrases-file]"),
    };

    let catalog = Catalog::load_dir(catalog_dir)
        .with_context(|| format!("failed to load catalog from '{catalog_dir}'"))?;
    info!("Catalog loaded: {} canonical ingredients", catalog.len());

    let input = match args.get(2) {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let config = ParserConfig {
        collect_stats: true,
        ..Default::default()
    };
    let mut parser = IngredientParser::with_config(&catalog, config, Box::new(SimplifyExtractor));

    let mut matched = 0u64;
    let mut unmatched = 0u64;
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // One unmatched phrase never aborts the batch.
        match parser.parse(line) {
            Some(canonical) => {
                matched += 1;
                println!("{line} -> {canonical}");
            }
            None => {
                unmatched += 1;
                warn!("No match for '{}'", line);
                println!("{line} -> <no match>");
            }
        }
    }

    info!("Parsed {} phrases, {} unmatched", matched + unmatched, unmatched);

    if let Some(stats) = parser.take_stats() {
        let report = serde_json::to_string_pretty(&stats).context("failed to serialize stats")?;
        eprintln!("{report}");
    }

    Ok(())
}
