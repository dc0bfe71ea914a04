//! Catalog layer providing recipe data to the rest of the plugin.
//!
//! This module abstracts where recipes come from. The current implementation
//! reads a JSON catalog file (with an embedded default dataset as fallback)
//! and answers listing and lookup requests; nothing here mutates data.
//!
//! # Modules
//!
//! - `backend`: Catalog trait abstraction for data sources
//! - `json`: JSON file-based catalog implementation
//! - `sort`: Ordering applied when the catalog is read
//! - `models`: Catalog container and listing request/response types

pub mod backend;
pub mod json;
pub mod models;
pub mod sort;

pub use backend::Catalog;
pub use json::JsonCatalog;
pub use models::{CatalogData, ListQuery, Listing};
pub use sort::{sort_recipes, SortDir, SortKey};
