//! Catalog data models.
//!
//! This module defines the on-disk catalog container and the listing
//! accessor's request/response types. These are separate from the domain
//! models to keep the accessor's interface explicit: callers ask with a
//! [`ListQuery`] and receive a [`Listing`] of summaries plus a total count.

use crate::domain::{Recipe, RecipeSummary};
use crate::storage::sort::{SortDir, SortKey};
use serde::{Deserialize, Serialize};

/// On-disk catalog container format.
///
/// The top-level structure of the catalog JSON file. The version field
/// leaves room for future format migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    /// Version of the catalog format.
    pub version: u32,

    /// All recipes, in file order.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

impl Default for CatalogData {
    fn default() -> Self {
        Self {
            version: 1,
            recipes: Vec::new(),
        }
    }
}

/// Parameters for a listing request.
///
/// Mirrors the recipe-data accessor contract: an optional free-text term, an
/// optional result cap, and an ordering. The default query lists the whole
/// catalog newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text term matched against title, cuisine, course, and diets
    /// (trimmed, case-folded substring). Empty matches everything.
    pub q: String,

    /// Maximum number of items to return; `None` returns every match.
    pub page_size: Option<u32>,

    /// Ordering field.
    pub sort_by: SortKey,

    /// Ordering direction.
    pub sort_dir: SortDir,
}

/// Result of a listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Matching summaries, ordered and capped per the query.
    pub items: Vec<RecipeSummary>,

    /// Number of matches before the cap was applied.
    pub total: usize,
}
