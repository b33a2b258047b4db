//! # Ingredient Catalog Module
//!
//! This module holds the canonical ingredient catalog: the mapping from
//! canonical ingredient names to their category, and the alias table that
//! maps alternative spellings back to a canonical name.
//!
//! ## Catalog file format
//!
//! A catalog is loaded from a directory of plain-text category files. The
//! file name is the category label; every line describes one ingredient:
//!
//! ```text
//! flour
//! hot sauce: hot pepper sauce : pepper sauce
//! ```
//!
//! The first entry on a line is the canonical name, the colon-separated
//! remainder are aliases. Every canonical name is automatically its own
//! alias.
//!
//! The catalog is immutable after construction and can be shared by
//! reference across any number of parser instances.

use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Errors raised while building or loading a catalog.
///
/// All variants are fatal at construction time: they indicate corrupt
/// catalog data, never an operational failure.
#[derive(Debug)]
pub enum CatalogError {
    /// Filesystem errors while reading the catalog directory
    Io(std::io::Error),
    /// An alias points at a canonical name that is not in the catalog
    DanglingAlias { alias: String, target: String },
    /// A line contained no canonical name (e.g. ": alias")
    EmptyName { category: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "Catalog I/O error: {err}"),
            CatalogError::DanglingAlias { alias, target } => {
                write!(f, "Alias '{alias}' resolves to unknown ingredient '{target}'")
            }
            CatalogError::EmptyName { category } => {
                write!(f, "Empty canonical name in category '{category}'")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

/// The canonical ingredient catalog and its alias table.
///
/// Invariants, enforced at construction:
/// - every canonical name maps to exactly one category;
/// - every canonical name is its own alias;
/// - every alias resolves to a canonical name present in the catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// canonical name -> category label
    categories: HashMap<String, String>,
    /// alias -> canonical name (identity entries included)
    aliases: HashMap<String, String>,
}

impl Catalog {
    /// Build a catalog from `(canonical, category)` entries and
    /// `(alias, canonical)` pairs.
    ///
    /// Identity aliases are inserted automatically; a supplied alias whose
    /// target is not a canonical entry is a [`CatalogError::DanglingAlias`].
    pub fn from_entries<E, A>(entries: E, alias_pairs: A) -> Result<Self, CatalogError>
    where
        E: IntoIterator<Item = (String, String)>,
        A: IntoIterator<Item = (String, String)>,
    {
        let mut categories = HashMap::new();
        let mut aliases = HashMap::new();

        for (name, category) in entries {
            if let Some(previous) = categories.insert(name.clone(), category) {
                warn!("Ingredient '{}' redefined (was in '{}')", name, previous);
            }
            aliases.insert(name.clone(), name);
        }

        for (alias, target) in alias_pairs {
            if !categories.contains_key(&target) {
                return Err(CatalogError::DanglingAlias { alias, target });
            }
            aliases.insert(alias, target);
        }

        debug!(
            "Catalog built: {} canonical names, {} aliases",
            categories.len(),
            aliases.len()
        );

        Ok(Self { categories, aliases })
    }

    /// Load a catalog from a directory of category files.
    ///
    /// Subdirectories and unreadable entries are skipped with a warning;
    /// malformed lines are fatal.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut entries = Vec::new();
        let mut alias_pairs = Vec::new();

        for dir_entry in fs::read_dir(dir)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            if !path.is_file() {
                continue;
            }
            let category = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) if !name.starts_with('.') => name.to_string(),
                _ => {
                    warn!("Skipping unreadable catalog entry: {}", path.display());
                    continue;
                }
            };

            let contents = fs::read_to_string(&path)?;
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let mut parts = line.split(':').map(str::trim);
                let canonical = match parts.next() {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => return Err(CatalogError::EmptyName { category }),
                };

                for alias in parts.filter(|a| !a.is_empty()) {
                    alias_pairs.push((alias.to_string(), canonical.clone()));
                }
                entries.push((canonical, category.clone()));
            }
        }

        info!(
            "Loaded {} catalog entries from {}",
            entries.len(),
            dir.display()
        );

        Self::from_entries(entries, alias_pairs)
    }

    /// Iterate over canonical ingredient names.
    pub fn canonical_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Iterate over every matchable name: canonical names and aliases alike.
    ///
    /// This is the scan set for fuzzy matching; the winner is resolved back
    /// to its canonical form afterwards.
    pub fn match_candidates(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// Iterate over `(alias, canonical)` pairs, identity entries included.
    pub fn alias_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// Category label for a canonical ingredient name.
    pub fn category_of(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }

    /// Resolve an alias (or canonical name) to its canonical form.
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// Number of canonical ingredients.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when the catalog holds no ingredients.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
