//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application
//! state, following the MVVM pattern. View models are optimized for
//! rendering and contain pre-computed display information: formatted
//! columns, highlight ranges, pagination arithmetic, and detail lines.
//! They contain no business logic.

use crate::ui::pagination::PageControl;

/// Complete UI view model for rendering one frame.
///
/// Computed from `AppState` by `compute_viewmodel`. Exactly one of the
/// listing surface (`display_rows` + bars + pagination) or `detail` is
/// populated, depending on the active view.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Header information (title, match count).
    pub header: HeaderInfo,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// Search bar contents, present while search mode is active.
    pub search_bar: Option<SearchBarInfo>,

    /// Filter bar contents, present on the listing surface.
    pub filter_bar: Option<FilterBarInfo>,

    /// Rows of the current page window.
    pub display_rows: Vec<DisplayRow>,

    /// Index of the selected row within `display_rows`.
    pub selected_index: usize,

    /// Pagination strip contents, present on the listing surface.
    pub pagination: Option<PaginationInfo>,

    /// Empty state message when the catalog or the match set is empty.
    pub empty_state: Option<EmptyState>,

    /// Detail surface contents, present while a recipe is open.
    pub detail: Option<DetailView>,
}

/// Display information for a single listing row.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    /// Recipe title, truncated to the title column.
    pub title: String,

    /// Cuisine column value, empty when unknown.
    pub cuisine: String,

    /// Course column value, empty when unknown.
    pub course: String,

    /// Diet column value, empty when unknown.
    pub diet: String,

    /// Time column value (e.g. "30 min"), empty when unknown.
    pub time: String,

    /// Rating column value (e.g. "4.5"), empty when unrated.
    pub rating: String,

    /// Whether this row is currently selected.
    pub is_selected: bool,

    /// Character ranges of the title matching the search term.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices,
    /// exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current search term, live from the query string.
    pub query: String,
}

/// Filter bar display information.
///
/// All values are display-ready: "All"/"Any" stand in for unfiltered
/// facets, and the raw query string doubles as a shareable permalink for
/// the current selection.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    /// Cuisine filter label.
    pub cuisine: String,

    /// Course filter label.
    pub course: String,

    /// Diet filter label.
    pub diet: String,

    /// Max-time filter label.
    pub max_time: String,

    /// The raw query string backing the current selection.
    pub query_string: String,
}

/// Pagination strip display information.
#[derive(Debug, Clone)]
pub struct PaginationInfo {
    /// Page window arithmetic (numbers, jumps, prev/next).
    pub control: PageControl,

    /// Total matches across all pages.
    pub total: usize,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    /// Primary message (e.g. "No recipes match your filters").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Detail surface display information.
///
/// Everything is pre-formatted; the renderer only wraps to the terminal
/// width and applies the scroll window.
#[derive(Debug, Clone)]
pub struct DetailView {
    /// Recipe title.
    pub title: String,

    /// Short description, when present.
    pub description: Option<String>,

    /// One-line meta summary (rating, time, servings, author).
    pub meta: String,

    /// Tag labels (cuisine, course, diets, free-form tags).
    pub tags: Vec<String>,

    /// Formatted ingredient lines.
    pub ingredients: Vec<String>,

    /// Formatted step lines, numbered.
    pub steps: Vec<String>,

    /// Nutrition entries as (label, value) pairs.
    pub nutrition: Vec<(String, String)>,

    /// Gallery image references.
    pub gallery: Vec<String>,

    /// Vertical scroll offset in body lines.
    pub scroll: usize,
}
