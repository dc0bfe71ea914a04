//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! timer expiries, and worker responses, translating them into state changes
//! and action sequences. Every mutation of the listing selection goes
//! through the query store, so the query string stays the single source of
//! truth: handlers write a patch, and the next read re-derives the state
//! from the rewritten string.
//!
//! # Event categories
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `NextPage`, `PrevPage`, `FirstPage`,
//!   `LastPage`
//! - **Input**: `Char`, `Backspace`, `Escape`
//! - **Mode switching**: `SearchMode`, `FocusSearchBar`, `FocusResults`,
//!   `ExitSearch`
//! - **Filters**: `CycleCuisine`, `CycleCourse`, `CycleDiet`, `CycleMaxTime`,
//!   `ResetFilters`
//! - **Detail**: `OpenRecipe`, `Back`
//! - **System**: `DebounceElapsed`, `WorkerResponse`, `CloseFocus`

use crate::app::modes::{InputMode, SearchFocus, View};
use crate::app::query::QueryPatch;
use crate::app::state::{AppState, DetailState};
use crate::app::Action;
use crate::domain::error::Result;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, timers, or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Moves the listing cursor down (wraps), or scrolls the detail view.
    KeyDown,
    /// Moves the listing cursor up (wraps), or scrolls the detail view.
    KeyUp,
    /// Closes the floating pane and hides the plugin UI.
    CloseFocus,
    /// Opens the currently selected recipe in the detail view.
    OpenRecipe,
    /// Returns from the detail view to the listing.
    Back,
    /// Enters search mode with typing focus, clearing the previous term.
    SearchMode,
    /// Focuses the search input field (from navigating focus).
    FocusSearchBar,
    /// Focuses the filtered results list (from typing focus).
    FocusResults,
    /// Exits search mode and clears the search term.
    ExitSearch,
    /// Appends a character to the search term.
    Char(char),
    /// Removes the last character from the search term.
    Backspace,
    /// Clears search state in search mode; backs out of the detail view.
    Escape,

    /// Advances to the next page of results.
    NextPage,
    /// Returns to the previous page of results.
    PrevPage,
    /// Jumps to the first page.
    FirstPage,
    /// Jumps to the last page.
    LastPage,

    /// Cycles the cuisine filter through the derived options.
    CycleCuisine,
    /// Cycles the course filter through the derived options.
    CycleCourse,
    /// Cycles the diet filter through the derived options.
    CycleDiet,
    /// Cycles the max-time filter through the fixed minute menu.
    CycleMaxTime,
    /// Clears every filter, the search term, and pagination.
    ResetFilters,

    /// A debounce timer armed by a search edit has expired.
    DebounceElapsed,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to
/// execute.
///
/// Returns `(should_render, actions)`: whether the UI needs repainting and
/// the side effects the plugin runtime must perform.
///
/// # Errors
///
/// Returns errors from state mutation; the current handlers are
/// infallible in practice, but the signature leaves room for fallible
/// transitions without churning every caller.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            match state.view {
                View::Listing => state.move_selection_down(),
                View::Detail => {
                    if let Some(detail) = &mut state.detail {
                        detail.scroll = detail.scroll.saturating_add(1);
                    }
                }
            }
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            match state.view {
                View::Listing => state.move_selection_up(),
                View::Detail => {
                    if let Some(detail) = &mut state.detail {
                        detail.scroll = detail.scroll.saturating_sub(1);
                    }
                }
            }
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::OpenRecipe => {
            let Some(recipe) = state.selected_recipe() else {
                tracing::debug!("no recipe selected");
                if matches!(state.input_mode, InputMode::Search(_)) {
                    tracing::debug!("exiting search mode (no selection)");
                    exit_search(state);
                    return Ok((true, vec![]));
                }
                return Ok((false, vec![]));
            };

            tracing::debug!(slug = %recipe.slug, title = %recipe.title, "opening recipe");
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::fetch_recipe(
                    recipe.slug,
                ))],
            ))
        }
        Event::Back => {
            if state.view != View::Detail {
                return Ok((false, vec![]));
            }
            tracing::debug!("returning to listing");
            state.view = View::Listing;
            state.detail = None;
            Ok((true, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            set_search_term(state, String::new());
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.query().q.is_empty() {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.query().q, "exiting search mode");
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            let mut q = state.query().q;
            q.push(*c);

            tracing::trace!(query = %q, char = %c, "search term updated");

            // The query string updates per keystroke; the filter waits for
            // the debounce timer.
            state.store.set_params(&QueryPatch::q(q.clone()));
            let delay = state.debouncer.schedule(q);

            Ok((true, vec![Action::StartTimer { seconds: delay }]))
        }
        Event::Backspace => {
            if !matches!(state.input_mode, InputMode::Search(_)) {
                return Ok((false, vec![]));
            }

            let mut q = state.query().q;
            q.pop();

            state.store.set_params(&QueryPatch::q(q.clone()));
            let delay = state.debouncer.schedule(q);

            Ok((true, vec![Action::StartTimer { seconds: delay }]))
        }
        Event::Escape => match state.view {
            View::Detail => handle_event(state, &Event::Back),
            View::Listing => {
                if matches!(state.input_mode, InputMode::Search(_)) {
                    exit_search(state);
                    Ok((true, vec![]))
                } else {
                    Ok((false, vec![]))
                }
            }
        },
        Event::NextPage => turn_page(state, PageTurn::Next),
        Event::PrevPage => turn_page(state, PageTurn::Prev),
        Event::FirstPage => turn_page(state, PageTurn::First),
        Event::LastPage => turn_page(state, PageTurn::Last),
        Event::CycleCuisine => {
            let next = AppState::cycle_facet(&state.facets.cuisines, &state.query().cuisine);
            tracing::debug!(cuisine = %next, "cycling cuisine filter");
            apply_filter(state, &QueryPatch::cuisine(next));
            Ok((true, vec![]))
        }
        Event::CycleCourse => {
            let next = AppState::cycle_facet(&state.facets.courses, &state.query().course);
            tracing::debug!(course = %next, "cycling course filter");
            apply_filter(state, &QueryPatch::course(next));
            Ok((true, vec![]))
        }
        Event::CycleDiet => {
            let next = AppState::cycle_facet(&state.facets.diets, &state.query().diet);
            tracing::debug!(diet = %next, "cycling diet filter");
            apply_filter(state, &QueryPatch::diet(next));
            Ok((true, vec![]))
        }
        Event::CycleMaxTime => {
            let next = AppState::cycle_max_time(state.query().time_max);
            tracing::debug!(time_max = ?next, "cycling max-time filter");
            apply_filter(state, &QueryPatch::time_max(next));
            Ok((true, vec![]))
        }
        Event::ResetFilters => {
            tracing::debug!("resetting filters and search");
            state.store.reset();
            state.debouncer.settle("");
            state.input_mode = InputMode::Normal;
            state.selected_index = 0;
            Ok((true, vec![]))
        }
        Event::DebounceElapsed => match state.debouncer.fire() {
            Some(q) => {
                tracing::debug!(query = %q, "debounced search term settled");
                state.clamp_selection();
                Ok((true, vec![]))
            }
            None => Ok((false, vec![])),
        },
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Page-turn directions shared by the four pagination events.
enum PageTurn {
    Next,
    Prev,
    First,
    Last,
}

/// Applies a page turn through the store, preserving every filter.
fn turn_page(state: &mut AppState, turn: PageTurn) -> Result<(bool, Vec<Action>)> {
    if state.view != View::Listing {
        return Ok((false, vec![]));
    }

    let result = state.result();
    let total_pages = result.total_pages();
    let current = result.page;

    let target = match turn {
        PageTurn::Next => current.saturating_add(1).min(total_pages),
        PageTurn::Prev => current.saturating_sub(1).max(1),
        PageTurn::First => 1,
        PageTurn::Last => total_pages,
    };

    if target == current {
        return Ok((false, vec![]));
    }

    tracing::debug!(from = current, to = target, "turning page");
    state.store.set_params(&QueryPatch::page(target));
    state.selected_index = 0;
    Ok((true, vec![]))
}

/// Writes a filter patch and resets the cursor for the new result set.
///
/// The page reset itself happens inside the store's serialize step.
fn apply_filter(state: &mut AppState, patch: &QueryPatch) {
    state.store.set_params(patch);
    state.selected_index = 0;
}

/// Leaves search mode, clearing the term both live and debounced.
fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.store.set_params(&QueryPatch::q(""));
    state.debouncer.settle("");
    state.clamp_selection();
}

/// Writes the search term through both the store and the debouncer at once.
fn set_search_term(state: &mut AppState, q: String) {
    state.store.set_params(&QueryPatch::q(q.clone()));
    state.debouncer.settle(q);
    state.clamp_selection();
}

/// Handles a response from the catalog worker.
fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::RecipesLoaded { recipes } => {
            if &state.recipes == recipes {
                tracing::debug!("recipes unchanged, skipping render");
                Ok((false, vec![]))
            } else {
                tracing::debug!(recipe_count = recipes.len(), "recipes loaded");
                state.set_recipes(recipes.clone());
                Ok((true, vec![]))
            }
        }
        WorkerResponse::RecipeLoaded { recipe } => {
            tracing::debug!(slug = %recipe.slug, "detail loaded");
            state.detail = Some(DetailState {
                recipe: (**recipe).clone(),
                scroll: 0,
            });
            state.view = View::Detail;
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        WorkerResponse::RecipeNotFound { slug } => {
            tracing::debug!(slug = %slug, "recipe missing from catalog");
            Ok((false, vec![]))
        }
        WorkerResponse::Error { message } => {
            tracing::error!("Worker error: {}", message);
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RecipeSummary;
    use crate::ui::theme::Theme;

    fn summary(idx: usize, title: &str, cuisine: &str) -> RecipeSummary {
        RecipeSummary {
            id: format!("r{idx}"),
            slug: format!("r{idx}"),
            title: title.to_string(),
            image: None,
            cuisine: Some(cuisine.to_string()),
            course: Some("Main".to_string()),
            diet: None,
            total_time: Some("30 min".to_string()),
            prep_time: None,
            cook_time: None,
            rating: None,
        }
    }

    /// Twelve recipes at page size 9: two pages.
    fn app() -> AppState {
        let recipes = (0..12)
            .map(|i| {
                let cuisine = if i % 2 == 0 { "Italian" } else { "Mexican" };
                summary(i, &format!("Recipe {i}"), cuisine)
            })
            .collect();
        AppState::new(recipes, Theme::default(), 9, 300)
    }

    fn handle(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
        handle_event(state, event).expect("event handled")
    }

    #[test]
    fn typing_updates_the_query_string_live_and_arms_timers() {
        let mut state = app();
        handle(&mut state, &Event::SearchMode);

        let mut timers = 0;
        for c in ['p', 'a', 's'] {
            let (_, actions) = handle(&mut state, &Event::Char(c));
            timers += actions
                .iter()
                .filter(|a| matches!(a, Action::StartTimer { .. }))
                .count();
        }

        assert_eq!(timers, 3);
        // Live value in the query string, filter still on the old term.
        assert_eq!(state.query().q, "pas");
        assert_eq!(state.effective_query().q, "");
    }

    #[test]
    fn only_the_final_debounce_expiry_refilters() {
        let mut state = app();
        handle(&mut state, &Event::SearchMode);
        for c in ['r', 'e', 'c'] {
            handle(&mut state, &Event::Char(c));
        }

        let (rendered_first, _) = handle(&mut state, &Event::DebounceElapsed);
        let (rendered_second, _) = handle(&mut state, &Event::DebounceElapsed);
        let (rendered_last, _) = handle(&mut state, &Event::DebounceElapsed);

        assert!(!rendered_first);
        assert!(!rendered_second);
        assert!(rendered_last);
        assert_eq!(state.effective_query().q, "rec");
    }

    #[test]
    fn cycling_a_filter_resets_pagination() {
        let mut state = app();
        handle(&mut state, &Event::NextPage);
        assert_eq!(state.query().page, 2);

        handle(&mut state, &Event::CycleCuisine);
        assert_eq!(state.query().cuisine, "Italian");
        assert_eq!(state.query().page, 1);
    }

    #[test]
    fn page_navigation_respects_bounds() {
        let mut state = app();

        let (rendered, _) = handle(&mut state, &Event::PrevPage);
        assert!(!rendered);

        handle(&mut state, &Event::NextPage);
        assert_eq!(state.query().page, 2);

        // Already on the last of two pages.
        let (rendered, _) = handle(&mut state, &Event::NextPage);
        assert!(!rendered);

        handle(&mut state, &Event::FirstPage);
        assert_eq!(state.query().page, 1);

        handle(&mut state, &Event::LastPage);
        assert_eq!(state.query().page, 2);
    }

    #[test]
    fn page_turns_preserve_the_search_term() {
        let mut state = app();
        handle(&mut state, &Event::SearchMode);
        handle(&mut state, &Event::Char('r'));
        handle(&mut state, &Event::DebounceElapsed);
        handle(&mut state, &Event::FocusResults);

        handle(&mut state, &Event::NextPage);
        assert_eq!(state.query().q, "r");
        assert_eq!(state.query().page, 2);
    }

    #[test]
    fn open_recipe_requests_the_selected_slug() {
        let mut state = app();
        handle(&mut state, &Event::KeyDown);

        let (_, actions) = handle(&mut state, &Event::OpenRecipe);
        match actions.first() {
            Some(Action::PostToWorker(WorkerMessage::FetchRecipe { slug, .. })) => {
                assert_eq!(slug, "r1");
            }
            other => panic!("expected FetchRecipe action, got {other:?}"),
        }
    }

    #[test]
    fn detail_response_switches_view_and_escape_returns() {
        let mut state = app();
        let recipe = crate::domain::Recipe {
            id: "r0".to_string(),
            slug: "r0".to_string(),
            title: "Recipe 0".to_string(),
            description: None,
            image: None,
            images: vec![],
            cuisine: None,
            course: None,
            diets: vec![],
            tags: vec![],
            prep_time_minutes: None,
            cook_time_minutes: None,
            total_time_minutes: None,
            servings: None,
            rating: None,
            author: None,
            ingredients: vec![],
            steps: vec![],
            nutrition: std::collections::BTreeMap::new(),
            created_at: 0,
        };

        handle(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::RecipeLoaded {
                recipe: Box::new(recipe),
            }),
        );
        assert_eq!(state.view, View::Detail);

        handle(&mut state, &Event::Escape);
        assert_eq!(state.view, View::Listing);
        assert!(state.detail.is_none());
    }

    #[test]
    fn reset_clears_search_filters_and_page() {
        let mut state = app();
        handle(&mut state, &Event::CycleCuisine);
        handle(&mut state, &Event::SearchMode);
        for c in ['p', 'i'] {
            handle(&mut state, &Event::Char(c));
        }

        handle(&mut state, &Event::ResetFilters);
        assert_eq!(state.query(), crate::app::query::QueryState::default());
        assert_eq!(state.effective_query().q, "");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn recipes_loaded_refreshes_facets_and_skips_noop_renders() {
        let mut state = app();
        let same = state.recipes.clone();
        let (rendered, _) = handle(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::RecipesLoaded { recipes: same }),
        );
        assert!(!rendered);

        let fewer = vec![summary(0, "Only One", "Thai")];
        let (rendered, _) = handle(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::RecipesLoaded { recipes: fewer }),
        );
        assert!(rendered);
        assert_eq!(state.facets.cuisines, vec!["Thai"]);
    }
}
