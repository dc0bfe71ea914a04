//! User interface rendering layer with component-based architecture.
//!
//! This module orchestrates the terminal UI, transforming view models into
//! ANSI-styled output through composable rendering components. It provides
//! theme support, responsive layout, and search-match highlighting.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`pagination`]: Pure page-window arithmetic for the pagination strip
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, wrapping)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod pagination;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use pagination::{PageControl, DEFAULT_MAX_BUTTONS};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailView, DisplayRow, EmptyState, FilterBarInfo, FooterInfo, HeaderInfo, PaginationInfo,
    SearchBarInfo, UIViewModel,
};
