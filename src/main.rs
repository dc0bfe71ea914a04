//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the zest library
//! and the Zellij plugin system. It implements the `ZellijPlugin` and
//! `ZellijWorker` traits to handle Zellij events and lifecycle.
//!
//! # Plugin lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `CustomMessage`, `Timer`, and
//!    permission events
//! 3. **Initial Load**: Once permissions are granted, ask the worker for
//!    the recipe catalog
//! 4. **Update**: Translate Zellij events to library events, delegate to
//!    `handle_event`, execute returned actions
//! 5. **Render**: Call the library render function
//!
//! # Worker communication
//!
//! Messages between plugin and worker use JSON serialization:
//!
//! - Plugin → Worker: [`WorkerMessage`] (`LoadRecipes`, `FetchRecipe`)
//! - Worker → Plugin: [`WorkerResponse`] (`RecipesLoaded`, `RecipeLoaded`, ...)
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! In the listing (normal mode):
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `h`/`Left`, `l`/`Right`: Previous / next page
//! - `g` / `G`: First / last page
//! - `/`: Enter search mode
//! - `c` / `o` / `d` / `t`: Cycle cuisine / course / diet / max-time filter
//! - `r`: Reset filters and search
//! - `Enter`: Open the selected recipe
//! - `q`: Close the plugin
//!
//! In search mode:
//! - printable keys: Type into the search term
//! - `Enter`: Focus the results; `Esc`: Exit search
//!
//! In the detail view:
//! - `j`/`k`: Scroll
//! - `Esc`/`Backspace`: Back to the listing

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::{post_message_to, set_timeout};

use zest::worker::{WorkerMessage, WorkerResponse, ZestWorker};
use zest::{handle_event, Action, Config, Event, InputMode, SearchFocus, View};

// Register plugin and worker with Zellij
register_plugin!(State);
register_worker!(ZestWorker, zest_worker, ZEST_WORKER);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication.
struct State {
    /// Core application state from the library layer.
    app: zest::app::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: zest::initialize(&default_config),
            worker_name: "zest".to_string(),
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes tracing and application state,
    /// requests permissions, and subscribes to events. The catalog request
    /// waits for the permission grant.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        zest::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!("plugin loading started");
        tracing::debug!(page_size = config.page_size, "parsed configuration");
        self.app = zest::initialize(&config);
        tracing::debug!("app state initialized");

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::FullHdAccess]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if
    /// the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions);
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        zest::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Whether a key should be fed into the search term as a character.
    fn is_typing(&self) -> bool {
        self.app.input_mode == InputMode::Search(SearchFocus::Typing)
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        Some(match key.bare_key {
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Left => Event::PrevPage,
            BareKey::Right => Event::NextPage,
            BareKey::Esc => Event::Escape,
            BareKey::Enter => {
                if self.is_typing() {
                    Event::FocusResults
                } else {
                    Event::OpenRecipe
                }
            }
            BareKey::Backspace => {
                if self.app.view == View::Detail {
                    Event::Back
                } else {
                    Event::Backspace
                }
            }
            BareKey::Char('j') if !self.is_typing() => Event::KeyDown,
            BareKey::Char('k') if !self.is_typing() => Event::KeyUp,
            BareKey::Char('h') if !self.is_typing() => Event::PrevPage,
            BareKey::Char('l') if !self.is_typing() => Event::NextPage,
            BareKey::Char('g') if self.app.input_mode == InputMode::Normal => Event::FirstPage,
            BareKey::Char('G') if self.app.input_mode == InputMode::Normal => Event::LastPage,
            BareKey::Char('/') if self.app.view == View::Listing => {
                match self.app.input_mode {
                    InputMode::Normal => Event::SearchMode,
                    InputMode::Search(_) => Event::FocusSearchBar,
                }
            }
            BareKey::Char('q') if self.app.input_mode == InputMode::Normal => Event::CloseFocus,
            BareKey::Char('c') if self.app.input_mode == InputMode::Normal => Event::CycleCuisine,
            BareKey::Char('o') if self.app.input_mode == InputMode::Normal => Event::CycleCourse,
            BareKey::Char('d') if self.app.input_mode == InputMode::Normal => Event::CycleDiet,
            BareKey::Char('t') if self.app.input_mode == InputMode::Normal => Event::CycleMaxTime,
            BareKey::Char('r') if self.app.input_mode == InputMode::Normal => Event::ResetFilters,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Handles permission request results.
    fn handle_permission_result(&self, permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - requesting catalog");
                self.post_worker_message(&WorkerMessage::load_recipes());
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - catalog file access unavailable");
                // The embedded dataset still works; ask the worker anyway.
                self.post_worker_message(&WorkerMessage::load_recipes());
            }
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => {
                    tracing::debug!(response = ?response, "worker response received");
                    Some(Event::WorkerResponse(response))
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Posts a message to the worker thread.
    ///
    /// Serializes the message as JSON and sends via Zellij's IPC system.
    /// Serialization errors are logged, not propagated.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::PostToWorker(ref message) => {
                tracing::debug!(message = ?message, "posting message to worker");
                self.post_worker_message(message);
            }
            Action::StartTimer { seconds } => {
                tracing::debug!(seconds = seconds, "arming debounce timer");
                set_timeout(*seconds);
            }
        }
    }
}
