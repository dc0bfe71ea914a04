//! JSON file-based catalog.
//!
//! This module provides the default [`Catalog`] implementation: a read-only
//! JSON file loaded once into memory. When no catalog file exists yet, the
//! dataset embedded in the binary is used, so the plugin renders something
//! useful on first launch.
//!
//! # File format
//!
//! ```json
//! {
//!   "version": 1,
//!   "recipes": [
//!     {
//!       "id": "r-001",
//!       "slug": "margherita-pizza",
//!       "title": "Margherita Pizza",
//!       "cuisine": "Italian",
//!       "course": "Main",
//!       "total_time_minutes": 35,
//!       "created_at": 1735689600
//!     }
//!   ]
//! }
//! ```

use crate::domain::error::{Result, ZestError};
use crate::domain::Recipe;
use crate::storage::backend::Catalog;
use crate::storage::models::{CatalogData, ListQuery, Listing};
use crate::storage::sort::sort_recipes;
use std::path::PathBuf;

/// Default dataset compiled into the plugin.
const EMBEDDED_CATALOG: &str = include_str!("../../data/recipes.json");

/// Read-only JSON file catalog.
///
/// The entire dataset is loaded on construction and kept in memory; listing
/// and lookup requests never touch the filesystem again.
pub struct JsonCatalog {
    /// In-memory dataset.
    data: CatalogData,
}

impl JsonCatalog {
    /// Opens a catalog backed by a JSON file.
    ///
    /// If the file exists it is loaded; otherwise the embedded default
    /// dataset is used. Parent directories are not created; the catalog
    /// never writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid JSON.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON catalog");

        let data = if file_path.exists() {
            tracing::debug!("loading catalog file");
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no catalog file, using embedded dataset");
            Self::embedded_data()
        };

        tracing::debug!(recipe_count = data.recipes.len(), "catalog initialized");

        Ok(Self { data })
    }

    /// Builds a catalog from the embedded default dataset.
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            data: Self::embedded_data(),
        }
    }

    /// Parses the dataset compiled into the binary.
    fn embedded_data() -> CatalogData {
        serde_json::from_str(EMBEDDED_CATALOG)
            .expect("embedded recipe catalog should always parse")
    }

    /// Loads catalog data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &PathBuf) -> Result<CatalogData> {
        let contents = std::fs::read_to_string(path)?;
        let data: CatalogData = serde_json::from_str(&contents)
            .map_err(|e| ZestError::Catalog(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            recipes = data.recipes.len(),
            "loaded catalog data"
        );

        Ok(data)
    }

    /// Whether a recipe matches the accessor's free-text term.
    ///
    /// Same casefold-and-substring rule the listing engine applies, checked
    /// against title, cuisine, course, and every diet label.
    fn matches_term(recipe: &Recipe, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }

        let title = recipe.title.to_lowercase();
        let cuisine = recipe.cuisine.as_deref().unwrap_or("").to_lowercase();
        let course = recipe.course.as_deref().unwrap_or("").to_lowercase();

        title.contains(term)
            || cuisine.contains(term)
            || course.contains(term)
            || recipe
                .diets
                .iter()
                .any(|d| d.to_lowercase().contains(term))
    }
}

impl Catalog for JsonCatalog {
    fn list_recipes(&self, query: &ListQuery) -> Result<Listing> {
        let _span = tracing::debug_span!("json_list_recipes",
            q = %query.q,
            page_size = ?query.page_size
        )
        .entered();

        let term = query.q.trim().to_lowercase();
        let mut matching: Vec<Recipe> = self
            .data
            .recipes
            .iter()
            .filter(|r| Self::matches_term(r, &term))
            .cloned()
            .collect();

        sort_recipes(&mut matching, query.sort_by, query.sort_dir);

        let total = matching.len();
        if let Some(cap) = query.page_size {
            matching.truncate(cap as usize);
        }

        let items = matching.iter().map(Recipe::summary).collect();

        tracing::debug!(total = total, "listing computed");
        Ok(Listing { items, total })
    }

    fn get_by_slug(&self, slug: &str) -> Result<Option<Recipe>> {
        let _span = tracing::debug_span!("json_get_by_slug", slug = %slug).entered();

        let recipe = self.data.recipes.iter().find(|r| r.slug == slug).cloned();

        tracing::debug!(found = recipe.is_some(), "slug lookup complete");
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sort::{SortDir, SortKey};
    use std::io::Write;

    fn catalog_json() -> &'static str {
        r#"{
            "version": 1,
            "recipes": [
                {
                    "id": "r1",
                    "slug": "tiramisu",
                    "title": "Tiramisu",
                    "cuisine": "Italian",
                    "course": "Dessert",
                    "created_at": 100
                },
                {
                    "id": "r2",
                    "slug": "pad-thai",
                    "title": "Pad Thai",
                    "cuisine": "Thai",
                    "course": "Main",
                    "diets": ["Vegetarian"],
                    "created_at": 300
                },
                {
                    "id": "r3",
                    "slug": "shakshuka",
                    "title": "Shakshuka",
                    "cuisine": "Middle Eastern",
                    "course": "Breakfast",
                    "created_at": 200
                }
            ]
        }"#
    }

    fn file_catalog() -> JsonCatalog {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recipes.json");
        let mut file = std::fs::File::create(&path).expect("create catalog file");
        file.write_all(catalog_json().as_bytes()).expect("write");
        JsonCatalog::new(path).expect("load catalog")
    }

    #[test]
    fn lists_newest_first_by_default() {
        let catalog = file_catalog();
        let listing = catalog.list_recipes(&ListQuery::default()).expect("list");

        assert_eq!(listing.total, 3);
        let slugs: Vec<&str> = listing.items.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["pad-thai", "shakshuka", "tiramisu"]);
    }

    #[test]
    fn term_matches_title_cuisine_course_and_diets() {
        let catalog = file_catalog();

        let by_title = catalog
            .list_recipes(&ListQuery {
                q: "shak".to_string(),
                ..ListQuery::default()
            })
            .expect("list");
        assert_eq!(by_title.total, 1);

        let by_diet = catalog
            .list_recipes(&ListQuery {
                q: "vegetarian".to_string(),
                ..ListQuery::default()
            })
            .expect("list");
        assert_eq!(by_diet.items[0].slug, "pad-thai");
    }

    #[test]
    fn cap_limits_items_but_not_total() {
        let catalog = file_catalog();
        let listing = catalog
            .list_recipes(&ListQuery {
                page_size: Some(2),
                ..ListQuery::default()
            })
            .expect("list");

        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.total, 3);
    }

    #[test]
    fn title_sort_is_available() {
        let catalog = file_catalog();
        let listing = catalog
            .list_recipes(&ListQuery {
                sort_by: SortKey::Title,
                sort_dir: SortDir::Asc,
                ..ListQuery::default()
            })
            .expect("list");

        assert_eq!(listing.items[0].title, "Pad Thai");
    }

    #[test]
    fn slug_lookup_finds_full_recipe() {
        let catalog = file_catalog();

        let recipe = catalog.get_by_slug("tiramisu").expect("lookup");
        assert_eq!(recipe.expect("present").title, "Tiramisu");

        assert!(catalog.get_by_slug("missing").expect("lookup").is_none());
    }

    #[test]
    fn missing_file_falls_back_to_embedded_dataset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = JsonCatalog::new(dir.path().join("absent.json")).expect("init");

        let listing = catalog.list_recipes(&ListQuery::default()).expect("list");
        assert!(listing.total > 0);
    }

    #[test]
    fn invalid_file_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "not json").expect("write");

        assert!(JsonCatalog::new(path).is_err());
    }
}
