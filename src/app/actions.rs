//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! system events. Actions bridge pure state transformations and effectful
//! operations like hiding the pane, messaging the background worker, or
//! arming debounce timers.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The plugin
//! runtime executes these actions in sequence.

use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
///
/// Actions are produced by the event handler and executed by the plugin
/// shim. They represent the boundary between pure state transformations and
/// effectful operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g.
    /// pressing 'q' in the listing).
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Enables asynchronous catalog operations (loading the listing,
    /// fetching a full recipe) without blocking the main event loop.
    PostToWorker(WorkerMessage),

    /// Arms a one-shot timer that fires a `Timer` event after the given
    /// number of seconds.
    ///
    /// Used by the debounce machinery: every search keystroke arms a timer,
    /// and only the last timer of a burst emits the coalesced value.
    StartTimer {
        /// Delay until expiry, in seconds.
        seconds: f64,
    },
}
