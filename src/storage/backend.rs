//! Catalog abstraction.
//!
//! This module defines the [`Catalog`] trait that abstracts over recipe data
//! sources. The rest of the plugin only ever lists summaries or fetches one
//! full recipe, so the trait is exactly those two operations, not a generic
//! repository.

use crate::domain::error::Result;
use crate::domain::Recipe;
use crate::storage::models::{ListQuery, Listing};

/// Abstraction over read-only recipe data sources.
///
/// Implementations own the full dataset and answer listing and lookup
/// requests. Nothing in the plugin mutates recipes; the catalog is a data
/// provider, not a store.
///
/// # Implementations
///
/// - [`JsonCatalog`](crate::storage::JsonCatalog): JSON file with an
///   embedded default dataset (default)
pub trait Catalog: Send {
    /// Lists recipe summaries matching the query.
    ///
    /// Applies the query's free-text term, ordering, and result cap.
    /// `total` in the returned [`Listing`] counts matches before the cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data source fails.
    fn list_recipes(&self, query: &ListQuery) -> Result<Listing>;

    /// Fetches one full recipe by slug.
    ///
    /// Returns `Ok(None)` when no recipe has the given slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data source fails.
    fn get_by_slug(&self, slug: &str) -> Result<Option<Recipe>>;
}
