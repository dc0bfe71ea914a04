//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main
//! plugin thread and the background worker thread that reads the recipe
//! catalog. It also implements distributed tracing context propagation
//! across thread boundaries.

use crate::domain::{Recipe, RecipeSummary};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::debug!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            tracing::debug!("span context is not valid");
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_recipes(LoadRecipes {}),
    fetch_recipe(FetchRecipe { slug: String }),
}

/// Messages sent from the main thread to the worker thread.
///
/// Each variant corresponds to a catalog operation performed asynchronously.
/// All variants include an optional trace context for distributed tracing
/// support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load the full listing of recipe summaries from the catalog.
    LoadRecipes {
        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch one full recipe for the detail view.
    FetchRecipe {
        /// Slug of the recipe to fetch.
        slug: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

/// Responses sent from the worker thread back to the main thread.
///
/// Each variant corresponds to the completion of a worker operation, either
/// successfully with result data or with an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The listing was successfully loaded from the catalog.
    RecipesLoaded {
        /// Recipe summaries in the catalog's default order (newest first).
        recipes: Vec<RecipeSummary>,
    },

    /// A full recipe was found for a detail request.
    RecipeLoaded {
        /// The requested recipe.
        recipe: Box<Recipe>,
    },

    /// No recipe exists for the requested slug.
    RecipeNotFound {
        /// The slug that failed to resolve.
        slug: String,
    },

    /// An error occurred during the worker operation.
    Error {
        /// Human-readable error message.
        message: String,
    },
}
