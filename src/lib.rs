//! zest: a Zellij plugin for browsing your recipe collection.
//!
//! zest renders a client-side recipe browser in the terminal:
//! - A listing view with live free-text search, exact-match facet filters
//!   (cuisine, course, diet), a max-time filter, and pagination
//! - A detail view with ingredients, steps, nutrition, and gallery
//! - A query-string-backed selection state, so the whole listing state is
//!   one shareable string
//! - A read-only JSON catalog loaded by a background Zellij worker thread
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Query store
//! │  - Event handling                                   │  ← Filtering
//! │  - Debounced search                                 │  ← View models
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON file   │   │ - Async load  │
//! │ - Theming     │   │ - Ordering    │   │ - IPC bridge  │
//! │ - Components  │   │ - Accessor API│   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Recipe models (domain/recipe)                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Query-string state
//!
//! The listing selection (search term, filters, page) lives in a single
//! URL-style query string managed by [`app::QueryStore`]. Every control
//! writes patches through the store and every read re-parses the string,
//! so there is exactly one source of truth and the whole selection can be
//! shared as text. Changing any filter resets pagination to page 1;
//! changing only the page preserves the filters.
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/zest.wasm" {
//!         page_size "9"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! The recipe catalog is read from
//! `~/.local/share/zellij/zest/recipes.json`; when that file does not
//! exist, a built-in starter catalog is used.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{
    filter_and_page, handle_event, parse, serialize, Action, AppState, Event, FilteredResult,
    InputMode, QueryPatch, QueryState, QueryStore, SearchFocus, View,
};
pub use domain::{Recipe, RecipeSummary, Result, ZestError};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default number of recipes per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of recipes per listing page. Default: 9
    pub page_size: u32,

    /// Search debounce delay in milliseconds. Default: 300
    pub debounce_ms: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: app::debounce::DEFAULT_DEBOUNCE_MS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. This function extracts and parses typed
    /// values with fallback defaults: `page_size` and `debounce_ms` fall
    /// back when absent or unparsable, and a zero page size is treated as
    /// the default rather than an empty listing.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let page_size = config
            .get("page_size")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let debounce_ms = config
            .get("debounce_ms")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(app::debounce::DEFAULT_DEBOUNCE_MS);

        Self {
            page_size,
            debounce_ms,
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new [`AppState`] with the resolved theme (custom file, named
/// built-in, or default) and an empty recipe list; the worker populates
/// it after the first `LoadRecipes` round trip.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing zest plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            let expanded = infrastructure::paths::expand_tilde(theme_file);
            Theme::from_file(&expanded).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(vec![], theme, config.page_size, config.debounce_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parses_typed_values_with_fallbacks() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "12".to_string());
        map.insert("debounce_ms".to_string(), "150".to_string());
        map.insert("theme".to_string(), "catppuccin-latte".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.page_size, 12);
        assert_eq!(config.debounce_ms, 150);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    }

    #[test]
    fn bad_config_values_fall_back_to_defaults() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "zero".to_string());
        map.insert("debounce_ms".to_string(), "-1".to_string());

        let config = Config::from_zellij(&map);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.debounce_ms, app::debounce::DEFAULT_DEBOUNCE_MS);

        map.insert("page_size".to_string(), "0".to_string());
        assert_eq!(Config::from_zellij(&map).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn initialize_builds_an_empty_listing_state() {
        let state = initialize(&Config::default());
        assert!(state.recipes.is_empty());
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(state.view, View::Listing);
    }
}
