//! Input and view mode state types for the application.
//!
//! This module defines the state machine enums that control user interaction
//! modes and which surface is displayed. These types determine which
//! keybindings are active and how input is processed.
//!
//! # State machine
//!
//! The application operates in one of two primary input modes:
//! - **Normal**: Default navigation and command mode
//! - **Search**: Active search with typing or result navigation focus
//!
//! Views select the displayed surface:
//! - **Listing**: Paginated, filterable recipe table
//! - **Detail**: Full recipe (ingredients, steps, nutrition)

/// Focus state within search mode.
///
/// Determines whether search input is being typed or filtered results are
/// being navigated. Controls which keybindings are active during search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// User is typing in the search input field.
    ///
    /// Accepts character input, backspace, and enter (to switch to Navigating).
    Typing,

    /// User is navigating through filtered search results.
    ///
    /// Accepts j/k for movement, enter to open a recipe, and / to return to
    /// Typing.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Active search mode with focus state.
    ///
    /// Contains a [`SearchFocus`] variant indicating whether the user is
    /// typing or navigating results.
    Search(SearchFocus),
}

/// Which surface is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The paginated recipe listing with search and filters.
    Listing,

    /// A single recipe's full details.
    Detail,
}
