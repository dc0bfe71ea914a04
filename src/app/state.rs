//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin, along with selection management, facet derivation, and UI view
//! model generation. The query string inside the state's [`QueryStore`] is
//! the single source of truth for the listing selection; everything else
//! here is either catalog data or derived display state.
//!
//! # State components
//!
//! - **Recipes**: summaries loaded from the catalog by the worker
//! - **Query store**: the query string holding search/filter/page state
//! - **Debouncer**: coalesces search keystrokes before re-filtering
//! - **Facets**: distinct cuisine/course/diet values derived from the data
//! - **Selection**: cursor position within the current page window
//! - **Modes**: input mode and displayed view (listing or detail)

use crate::app::debounce::Debouncer;
use crate::app::filter::{filter_and_page, FilteredResult};
use crate::app::modes::{InputMode, SearchFocus, View};
use crate::app::query::{MemoryLocation, QueryState, QueryStore};
use crate::domain::{Recipe, RecipeSummary};
use crate::ui::pagination::{PageControl, DEFAULT_MAX_BUTTONS};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailView, DisplayRow, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, UIViewModel,
};

/// Max-time menu offered by the time filter, in minutes.
pub const TIME_OPTIONS: [u32; 5] = [15, 30, 45, 60, 90];

/// Distinct facet values derived from the loaded catalog.
///
/// Rebuilt whenever the recipe list changes; insertion order follows the
/// catalog so the cycle order feels stable to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    /// Distinct cuisine labels.
    pub cuisines: Vec<String>,

    /// Distinct course labels.
    pub courses: Vec<String>,

    /// Distinct diet labels.
    pub diets: Vec<String>,
}

/// State of the detail view: the loaded recipe and its scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    /// The recipe being displayed.
    pub recipe: Recipe,

    /// Vertical scroll offset in body lines.
    pub scroll: usize,
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and worker
/// responses. View models are computed on demand from state snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Recipe summaries in catalog order (newest first). Loaded by the
    /// worker; empty until the first response arrives.
    pub recipes: Vec<RecipeSummary>,

    /// Query string store. The authoritative selection state.
    pub store: QueryStore<MemoryLocation>,

    /// Search-term debouncer feeding the filter.
    pub debouncer: Debouncer,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Displayed surface.
    pub view: View,

    /// Zero-based cursor position within the current page window.
    pub selected_index: usize,

    /// Loaded detail view, present while `view` is [`View::Detail`].
    pub detail: Option<DetailState>,

    /// Facet options derived from `recipes`.
    pub facets: Facets,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Number of recipes per listing page.
    pub page_size: u32,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Parameters
    ///
    /// * `recipes` - Initial summaries (typically empty until the worker loads data)
    /// * `theme` - Color scheme for UI rendering
    /// * `page_size` - Recipes per listing page
    /// * `debounce_ms` - Search debounce delay in milliseconds
    #[must_use]
    pub fn new(recipes: Vec<RecipeSummary>, theme: Theme, page_size: u32, debounce_ms: u64) -> Self {
        let facets = Facets::derive(&recipes);
        Self {
            recipes,
            store: QueryStore::new(MemoryLocation::new()),
            debouncer: Debouncer::new(debounce_ms),
            input_mode: InputMode::Normal,
            view: View::Listing,
            selected_index: 0,
            detail: None,
            facets,
            theme,
            page_size: page_size.max(1),
        }
    }

    /// Current query state, re-derived from the query string.
    #[must_use]
    pub fn query(&self) -> QueryState {
        self.store.read()
    }

    /// Query state as the filter consumes it: every field live from the
    /// query string except `q`, which lags behind typing by the debounce
    /// delay so the catalog is not re-filtered per keystroke.
    #[must_use]
    pub fn effective_query(&self) -> QueryState {
        let mut state = self.store.read();
        state.q = self.debouncer.value().to_string();
        state
    }

    /// Filters and paginates the catalog for the current selection.
    ///
    /// Recomputed on demand; the underlying function is pure, so calling it
    /// per render is safe.
    #[must_use]
    pub fn result(&self) -> FilteredResult {
        filter_and_page(&self.recipes, &self.effective_query(), self.page_size)
    }

    /// Currently selected recipe within the page window, if any.
    #[must_use]
    pub fn selected_recipe(&self) -> Option<RecipeSummary> {
        self.result().items.into_iter().nth(self.selected_index)
    }

    /// Moves the cursor down one row, wrapping to the top of the page.
    pub fn move_selection_down(&mut self) {
        let len = self.result().items.len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up one row, wrapping to the bottom of the page.
    pub fn move_selection_up(&mut self) {
        let len = self.result().items.len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Clamps the cursor after the result set changed underneath it.
    pub fn clamp_selection(&mut self) {
        let len = self.result().items.len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// Replaces the catalog summaries and refreshes derived state.
    pub fn set_recipes(&mut self, recipes: Vec<RecipeSummary>) {
        self.recipes = recipes;
        self.facets = Facets::derive(&self.recipes);
        self.clamp_selection();
    }

    /// Next value in a facet cycle: no filter, each option in order, back
    /// to no filter.
    #[must_use]
    pub fn cycle_facet(options: &[String], current: &str) -> String {
        if current.is_empty() {
            return options.first().cloned().unwrap_or_default();
        }
        match options.iter().position(|o| o == current) {
            Some(idx) => options.get(idx + 1).cloned().unwrap_or_default(),
            None => String::new(),
        }
    }

    /// Next value in the max-time cycle: unbounded, each option, back to
    /// unbounded.
    #[must_use]
    pub fn cycle_max_time(current: Option<u32>) -> Option<u32> {
        match current {
            None => Some(TIME_OPTIONS[0]),
            Some(value) => TIME_OPTIONS
                .iter()
                .position(|t| *t == value)
                .and_then(|idx| TIME_OPTIONS.get(idx + 1))
                .copied(),
        }
    }

    /// Computes a renderable view model from current state and terminal
    /// dimensions.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        match (&self.view, &self.detail) {
            (View::Detail, Some(detail)) => self.compute_detail_viewmodel(detail),
            _ => self.compute_listing_viewmodel(rows, cols),
        }
    }

    /// View model for the listing surface.
    fn compute_listing_viewmodel(&self, _rows: usize, cols: usize) -> UIViewModel {
        let state = self.query();
        let result = self.result();
        let debounced_q = self.debouncer.value();

        let display_rows: Vec<DisplayRow> = result
            .items
            .iter()
            .enumerate()
            .map(|(idx, recipe)| Self::compute_display_row(recipe, idx == self.selected_index, debounced_q, cols))
            .collect();

        let empty_state = if self.recipes.is_empty() {
            Some(EmptyState {
                message: "No recipes loaded".to_string(),
                subtitle: "Waiting for the catalog worker".to_string(),
            })
        } else if result.total == 0 {
            Some(EmptyState {
                message: "No recipes match your filters".to_string(),
                subtitle: "Press r to reset filters and search".to_string(),
            })
        } else {
            None
        };

        let control = PageControl::compute(state.page, self.page_size, result.total, DEFAULT_MAX_BUTTONS);

        UIViewModel {
            header: HeaderInfo {
                title: format!(" Recipes ({}) ", result.total),
            },
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(&state),
            filter_bar: Some(FilterBarInfo {
                cuisine: facet_label(&state.cuisine),
                course: facet_label(&state.course),
                diet: facet_label(&state.diet),
                max_time: state
                    .time_max
                    .map_or_else(|| "Any".to_string(), |t| format!("<= {t} min")),
                query_string: self.store.query_string(),
            }),
            display_rows,
            selected_index: self.selected_index,
            pagination: Some(PaginationInfo {
                control,
                total: result.total,
            }),
            empty_state,
            detail: None,
        }
    }

    /// View model for the detail surface.
    fn compute_detail_viewmodel(&self, detail: &DetailState) -> UIViewModel {
        let recipe = &detail.recipe;

        let mut meta = Vec::new();
        if let Some(rating) = recipe.rating {
            meta.push(format!("Rating {rating:.1}"));
        }
        if let Some(minutes) = recipe.total_minutes() {
            meta.push(format!("{minutes} min"));
        }
        if let Some(servings) = recipe.servings {
            meta.push(format!("Serves {servings}"));
        }
        if let Some(author) = &recipe.author {
            meta.push(format!("By {}", author.name));
        }
        if let Some(added) = chrono::DateTime::from_timestamp(recipe.created_at, 0) {
            meta.push(format!("Added {}", added.format("%b %Y")));
        }

        let mut tags = Vec::new();
        if let Some(cuisine) = &recipe.cuisine {
            tags.push(cuisine.clone());
        }
        if let Some(course) = &recipe.course {
            tags.push(course.clone());
        }
        tags.extend(recipe.diets.iter().cloned());
        tags.extend(recipe.tags.iter().cloned());

        let ingredients = recipe.ingredients.iter().map(format_ingredient).collect();

        let steps = recipe
            .steps
            .iter()
            .map(|step| {
                let mut line = format!("{}. {}", step.number, step.instruction);
                if let Some(minutes) = step.time_minutes {
                    line.push_str(&format!(" ({minutes} min)"));
                }
                line
            })
            .collect();

        let nutrition = recipe
            .nutrition
            .iter()
            .map(|(key, value)| (nutrition_label(key), value.clone()))
            .collect();

        UIViewModel {
            header: HeaderInfo {
                title: format!(" {} ", recipe.title),
            },
            footer: self.compute_footer(),
            search_bar: None,
            filter_bar: None,
            display_rows: vec![],
            selected_index: 0,
            pagination: None,
            empty_state: None,
            detail: Some(DetailView {
                title: recipe.title.clone(),
                description: recipe.description.clone(),
                meta: meta.join("   "),
                tags,
                ingredients,
                steps,
                nutrition,
                gallery: recipe.images.clone(),
                scroll: detail.scroll,
            }),
        }
    }

    /// Display row for a single recipe within the page window.
    fn compute_display_row(
        recipe: &RecipeSummary,
        is_selected: bool,
        debounced_q: &str,
        _cols: usize,
    ) -> DisplayRow {
        const TITLE_COLUMN_WIDTH: usize = 30;

        let title = if recipe.title.chars().count() > TITLE_COLUMN_WIDTH {
            let truncated: String = recipe.title.chars().take(TITLE_COLUMN_WIDTH - 3).collect();
            format!("{truncated}...")
        } else {
            recipe.title.clone()
        };

        let highlight_ranges = substring_ranges(&title, debounced_q);

        DisplayRow {
            title,
            cuisine: recipe.cuisine.clone().unwrap_or_default(),
            course: recipe.course.clone().unwrap_or_default(),
            diet: recipe.diet.clone().unwrap_or_default(),
            time: recipe.total_time.clone().unwrap_or_default(),
            rating: recipe
                .rating
                .map_or_else(String::new, |r| format!("{r:.1}")),
            is_selected,
            highlight_ranges,
        }
    }

    /// Footer keybindings text based on current input mode and view.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view) {
            (InputMode::Search(SearchFocus::Typing), _) => {
                "ESC: exit search  Enter: results  Ctrl+n/p: navigate  Type to filter".to_string()
            }
            (InputMode::Search(SearchFocus::Navigating), _) => {
                "ESC: exit search  /: edit query  j/k: navigate  Enter: open".to_string()
            }
            (InputMode::Normal, View::Listing) => {
                "j/k: move  h/l: page  g/G: first/last  /: search  c/o/d/t: filters  r: reset  Enter: open  q: quit"
                    .to_string()
            }
            (InputMode::Normal, View::Detail) => {
                "j/k: scroll  ESC: back to list  q: quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Search bar state if in search mode.
    ///
    /// Carries the live query-string value, not the debounced one, so typed
    /// characters appear immediately.
    fn compute_search_bar(&self, state: &QueryState) -> Option<SearchBarInfo> {
        if matches!(self.input_mode, InputMode::Search(_)) {
            Some(SearchBarInfo {
                query: state.q.clone(),
            })
        } else {
            None
        }
    }
}

impl Facets {
    /// Collects distinct facet values in catalog order.
    #[must_use]
    pub fn derive(recipes: &[RecipeSummary]) -> Self {
        let mut facets = Self::default();
        for recipe in recipes {
            push_distinct(&mut facets.cuisines, recipe.cuisine.as_deref());
            push_distinct(&mut facets.courses, recipe.course.as_deref());
            push_distinct(&mut facets.diets, recipe.diet.as_deref());
        }
        facets
    }
}

/// Appends a value if present, non-empty, and not seen before.
fn push_distinct(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() && !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}

/// Facet display label: the value, or "All" when unfiltered.
fn facet_label(value: &str) -> String {
    if value.is_empty() {
        "All".to_string()
    } else {
        value.to_string()
    }
}

/// One formatted ingredient line.
fn format_ingredient(ingredient: &crate::domain::Ingredient) -> String {
    let mut line = match &ingredient.quantity {
        Some(quantity) => format!("{quantity} {}", ingredient.name),
        None => ingredient.name.clone(),
    };
    if let Some(note) = &ingredient.note {
        line.push_str(&format!(" ({note})"));
    }
    line
}

/// Human-readable label for a nutrition key.
///
/// Splits on underscores, capitalizes the words, and turns a trailing
/// `g`/`mg` segment into a parenthesized unit: `protein_g` -> `Protein (g)`.
fn nutrition_label(key: &str) -> String {
    let mut words: Vec<&str> = key.split('_').filter(|w| !w.is_empty()).collect();
    let unit = match words.last() {
        Some(&"g") | Some(&"mg") => words.pop(),
        _ => None,
    };

    let mut label = words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ");

    if let Some(unit) = unit {
        label.push_str(&format!(" ({unit})"));
    }
    label
}

/// Character-index ranges where the needle occurs in the text,
/// case-insensitively. Feeds match highlighting in the listing.
fn substring_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return vec![];
    }

    let haystack: Vec<char> = text.to_lowercase().chars().collect();
    let needle_chars: Vec<char> = needle.chars().collect();
    if needle_chars.len() > haystack.len() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut idx = 0;
    while idx + needle_chars.len() <= haystack.len() {
        if haystack[idx..idx + needle_chars.len()] == needle_chars[..] {
            ranges.push((idx, idx + needle_chars.len()));
            idx += needle_chars.len();
        } else {
            idx += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, cuisine: &str, course: &str, diet: Option<&str>) -> RecipeSummary {
        RecipeSummary {
            id: title.to_string(),
            slug: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            image: None,
            cuisine: Some(cuisine.to_string()),
            course: Some(course.to_string()),
            diet: diet.map(String::from),
            total_time: Some("30 min".to_string()),
            prep_time: None,
            cook_time: None,
            rating: Some(4.0),
        }
    }

    fn state_with_recipes() -> AppState {
        AppState::new(
            vec![
                summary("Margherita Pizza", "Italian", "Main", Some("Vegetarian")),
                summary("Tacos", "Mexican", "Main", None),
                summary("Tiramisu", "Italian", "Dessert", Some("Vegetarian")),
            ],
            Theme::default(),
            9,
            300,
        )
    }

    #[test]
    fn facets_are_distinct_in_catalog_order() {
        let state = state_with_recipes();
        assert_eq!(state.facets.cuisines, vec!["Italian", "Mexican"]);
        assert_eq!(state.facets.courses, vec!["Main", "Dessert"]);
        assert_eq!(state.facets.diets, vec!["Vegetarian"]);
    }

    #[test]
    fn facet_cycle_walks_options_and_returns_to_unfiltered() {
        let options = vec!["Italian".to_string(), "Mexican".to_string()];
        assert_eq!(AppState::cycle_facet(&options, ""), "Italian");
        assert_eq!(AppState::cycle_facet(&options, "Italian"), "Mexican");
        assert_eq!(AppState::cycle_facet(&options, "Mexican"), "");
        // An option removed from the dataset falls back to unfiltered.
        assert_eq!(AppState::cycle_facet(&options, "Thai"), "");
    }

    #[test]
    fn max_time_cycle_covers_menu_and_unbounded() {
        assert_eq!(AppState::cycle_max_time(None), Some(15));
        assert_eq!(AppState::cycle_max_time(Some(15)), Some(30));
        assert_eq!(AppState::cycle_max_time(Some(90)), None);
        assert_eq!(AppState::cycle_max_time(Some(42)), None);
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut state = state_with_recipes();
        assert_eq!(state.selected_index, 0);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn effective_query_uses_debounced_search_term() {
        let mut state = state_with_recipes();
        state
            .store
            .set_params(&crate::app::query::QueryPatch::q("tira"));

        // The query string updated live, the filter input did not.
        assert_eq!(state.query().q, "tira");
        assert_eq!(state.effective_query().q, "");
        assert_eq!(state.result().total, 3);

        let _ = state.debouncer.schedule("tira");
        state.debouncer.fire();
        assert_eq!(state.effective_query().q, "tira");
        assert_eq!(state.result().total, 1);
    }

    #[test]
    fn listing_viewmodel_marks_empty_results() {
        let mut state = state_with_recipes();
        state
            .store
            .set_params(&crate::app::query::QueryPatch::cuisine("French"));

        let vm = state.compute_viewmodel(24, 80);
        assert!(vm.display_rows.is_empty());
        let empty = vm.empty_state.expect("empty state");
        assert_eq!(empty.message, "No recipes match your filters");
    }

    #[test]
    fn substring_highlight_ranges_are_case_insensitive() {
        assert_eq!(substring_ranges("Margherita", "MARG"), vec![(0, 4)]);
        assert_eq!(substring_ranges("banana", "an"), vec![(1, 3), (3, 5)]);
        assert!(substring_ranges("Tacos", "pizza").is_empty());
    }

    #[test]
    fn nutrition_labels_read_naturally() {
        assert_eq!(nutrition_label("calories"), "Calories");
        assert_eq!(nutrition_label("protein_g"), "Protein (g)");
        assert_eq!(nutrition_label("sodium_mg"), "Sodium (mg)");
        assert_eq!(nutrition_label("saturated_fat_g"), "Saturated Fat (g)");
    }
}
