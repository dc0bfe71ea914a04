//! Worker thread implementation for asynchronous catalog access.
//!
//! This module implements the Zellij worker thread interface, handling all
//! catalog I/O off the main plugin rendering loop. It includes distributed
//! tracing support for cross-thread observability.

use crate::domain::error::{Result, ZestError};
use crate::infrastructure::paths;
use crate::storage::backend::Catalog;
use crate::storage::{JsonCatalog, ListQuery};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state for handling catalog operations.
///
/// This struct runs on a separate thread spawned by Zellij and processes
/// messages sent from the main plugin thread. The catalog is initialized
/// lazily on first message receipt.
#[derive(Serialize, Deserialize, Default)]
pub struct ZestWorker {
    /// Recipe catalog, initialized lazily on first use.
    #[serde(skip)]
    catalog: Option<Box<dyn Catalog>>,
}

impl ZestWorker {
    /// Creates a new worker with an initialized catalog.
    ///
    /// Uses the JSON file catalog in the plugin data directory, falling
    /// back to the embedded dataset when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file exists but cannot be loaded.
    pub fn new() -> Result<Self> {
        let path = paths::get_data_dir().join("recipes.json");
        let catalog: Box<dyn Catalog> = Box::new(JsonCatalog::new(path)?);
        Ok(Self {
            catalog: Some(catalog),
        })
    }

    /// Returns the catalog, failing if not initialized.
    fn get_catalog(&self) -> Result<&dyn Catalog> {
        self.catalog
            .as_deref()
            .ok_or_else(|| ZestError::Worker("Catalog not initialized".to_string()))
    }

    /// Helper for handling catalog operation results with consistent logging.
    ///
    /// Standardizes error handling and success logging across all catalog
    /// operations in the worker.
    fn handle_catalog_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "catalog operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "catalog operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Handles the `LoadRecipes` message.
    ///
    /// Lists every recipe summary in the catalog's default order.
    fn handle_load_recipes(&mut self) -> WorkerResponse {
        Self::handle_catalog_result(
            "load recipes",
            self.get_catalog()
                .and_then(|catalog| catalog.list_recipes(&ListQuery::default())),
            |listing| {
                tracing::debug!(
                    recipe_count = listing.total,
                    "recipes loaded from catalog"
                );
                WorkerResponse::RecipesLoaded {
                    recipes: listing.items,
                }
            },
        )
    }

    /// Handles the `FetchRecipe` message.
    ///
    /// Looks up one full recipe for the detail view.
    fn handle_fetch_recipe(&mut self, slug: String) -> WorkerResponse {
        Self::handle_catalog_result(
            "fetch recipe",
            self.get_catalog()
                .and_then(|catalog| catalog.get_by_slug(&slug)),
            |recipe| match recipe {
                Some(recipe) => {
                    tracing::debug!(slug = %slug, "recipe fetched");
                    WorkerResponse::RecipeLoaded {
                        recipe: Box::new(recipe),
                    }
                }
                None => {
                    tracing::debug!(slug = %slug, "recipe not found");
                    WorkerResponse::RecipeNotFound { slug }
                }
            },
        )
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Reconstructs the OpenTelemetry context from the serialized trace
    /// information in the message, allowing spans created in the worker
    /// thread to be linked to their parent spans in the main thread.
    ///
    /// Returns a context guard that must be held for the duration of the
    /// operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = match message {
            WorkerMessage::LoadRecipes { trace_context, .. }
            | WorkerMessage::FetchRecipe { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace
    /// context and creates a tracing span for the operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadRecipes { .. } => self.handle_load_recipes(),

            WorkerMessage::FetchRecipe { slug, .. } => self.handle_fetch_recipe(slug),
        }
    }
}

/// Initializes tracing for the worker thread.
///
/// Sets up the same tracing configuration as the main thread, ensuring spans
/// from both threads are written to the same file.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker thread lifetime.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for ZestWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// This is the Zellij worker interface entry point. It:
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Lazy-initializes the catalog if needed
    /// 3. Deserializes the message payload
    /// 4. Processes the message via `handle_message`
    /// 5. Serializes and sends the response back to the main thread
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        if self.catalog.is_none() {
            match Self::new() {
                Ok(worker) => {
                    self.catalog = worker.catalog;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to initialize catalog");
                    let error_response = WorkerResponse::Error {
                        message: format!("Failed to initialize catalog: {e}"),
                    };
                    if let Ok(payload) = serde_json::to_string(&error_response) {
                        post_message_to_plugin(PluginMessage {
                            name: message,
                            payload,
                            worker_name: None,
                        });
                    }
                    return;
                }
            }
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                let plugin_message = PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                };
                post_message_to_plugin(plugin_message);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}
