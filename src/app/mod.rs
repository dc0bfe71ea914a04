//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/storage/worker layers. It
//! implements the event-driven architecture that powers the interactive
//! browser.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern, with
//! the query string as the single authoritative store for the listing
//! selection:
//!
//! ```text
//! User Input → Events → Event Handler → QueryStore write → query string
//!                           ↑                                  │
//!                           │                 parse ───────────┘
//!                           │                   │
//!                 Worker Responses        filter_and_page → View Model
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Delay-and-coalesce handling for the search term
//! - [`filter`]: Pure filtering and pagination over recipe summaries
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input and view mode state machine types
//! - [`query`]: Query state store backed by a URL-style query string
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod debounce;
pub mod filter;
pub mod handler;
pub mod modes;
pub mod query;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use filter::{filter_and_page, FilteredResult};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus, View};
pub use query::{parse, serialize, Location, MemoryLocation, QueryPatch, QueryState, QueryStore};
pub use state::AppState;
