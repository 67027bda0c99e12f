//! Recipe file import
//!
//! Reads product recipes from `*.bom` text files. Each file holds one
//! model written as line directives:
//!
//! ```text
//! # comments start with a hash
//! model Sofá Retrátil Milano
//! dimensions 2.30m x 1.05m
//! material Espuma D33 | 1.5 | chapa | 190 x 130 cm
//! material Tecido Suede | 14.5 | metros
//! ```
//!
//! A `#` starts a comment when it is the first non-blank character of the
//! line, or when it stands alone between whitespace (`metros  # note`).
//! Names such as `Parafuso #8` keep their hash.
//!
//! The unit kind of every material is decided here, once, from its unit label.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::catalog::{CatalogError, CatalogStore};
use crate::models::{coerce_number, MaterialDraft};

const RECIPE_EXTENSION: &str = "bom";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// A recipe parsed from one file, before it enters the catalog
#[derive(Debug, Default)]
pub struct ParsedRecipe {
    pub name: String,
    pub dimensions: String,
    pub materials: Vec<MaterialDraft>,
    pub bad_lines: Vec<usize>,
}

struct RecipePatterns {
    model: Regex,
    dimensions: Regex,
    material: Regex,
}

impl RecipePatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            model: Regex::new(r"^model\s+(.+)$")?,
            dimensions: Regex::new(r"^dimensions\s+(.+)$")?,
            material: Regex::new(r"^material\s+([^|]+)\|([^|]*)\|([^|]*)(?:\|([^|]*))?$")?,
        })
    }
}

/// Find all recipe files below a directory, in a stable order
pub fn find_recipe_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == RECIPE_EXTENSION))
        .collect()
}

fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if c == '#' && prev.is_some_and(char::is_whitespace) && next.is_none_or(char::is_whitespace) {
            return &line[..i];
        }
        prev = Some(c);
    }
    line
}

/// Read a recipe file as UTF-8 text
pub fn read_recipe_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse recipe text. Returns `None` when there is no `model` line.
pub fn parse_recipe(content: &str) -> Result<Option<ParsedRecipe>> {
    let patterns = RecipePatterns::new()?;
    Ok(parse_with(&patterns, content))
}

fn parse_with(patterns: &RecipePatterns, content: &str) -> Option<ParsedRecipe> {
    let mut recipe = ParsedRecipe::default();
    let mut has_model = false;

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(cap) = patterns.model.captures(line) {
            if has_model {
                warn!(line = line_no, "duplicate model line ignored");
                recipe.bad_lines.push(line_no);
            } else {
                recipe.name = cap[1].trim().to_string();
                has_model = true;
            }
        } else if let Some(cap) = patterns.dimensions.captures(line) {
            recipe.dimensions = cap[1].trim().to_string();
        } else if let Some(cap) = patterns.material.captures(line) {
            let consumption = cap[2].trim();
            let parsed = coerce_number(consumption);
            if !parsed.is_finite() || parsed < 0.0 {
                warn!(line = line_no, value = consumption, "consumption is not a valid amount, using 0");
            }
            recipe.materials.push(MaterialDraft::new(
                &cap[1],
                consumption,
                &cap[3],
                cap.get(4).map_or("", |m| m.as_str()),
            ));
        } else {
            warn!(line = line_no, content = line, "unrecognized recipe line");
            recipe.bad_lines.push(line_no);
        }
    }

    has_model.then_some(recipe)
}

/// Import every recipe file below `dir` into a fresh catalog
pub fn import_catalog_dir(dir: &Path) -> Result<(CatalogStore, ImportStats)> {
    let patterns = RecipePatterns::new()?;
    let mut store = CatalogStore::new();
    let mut stats = ImportStats::default();

    info!("Scanning {} for recipe files", dir.display());
    let files = find_recipe_files(dir);
    debug!(count = files.len(), "found recipe files");

    for path in &files {
        let content = match read_recipe_file(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("{}", e);
                stats.errors += 1;
                continue;
            }
        };

        let Some(recipe) = parse_with(&patterns, &content) else {
            warn!("Skipping {}: no model line", path.display());
            stats.skipped += 1;
            continue;
        };

        let model_id = store.add_model(&recipe.name, &recipe.dimensions);
        stats.models += 1;
        stats.materials += recipe.materials.len();
        stats.errors += recipe.bad_lines.len();

        for draft in recipe.materials {
            store.add_material(&model_id, draft)?;
        }

        debug!(
            model = %model_id,
            file = %path.display(),
            bad_lines = ?recipe.bad_lines,
            "imported recipe"
        );
    }

    Ok((store, stats))
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub models: usize,
    pub materials: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl std::fmt::Display for ImportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Imported {} models ({} materials). Skipped: {}, Errors: {}",
            self.models, self.materials, self.skipped, self.errors
        )
    }
}
