//! Tracing initialization and subscriber setup.
//!
//! Configures the tracing subscriber with OpenTelemetry integration,
//! wiring `tracing` macros through the OTel layer to the file exporter.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// The span level comes from `config.trace_level`, defaulting to `"info"`.
/// Traces are written to `zest-otlp.json` inside the plugin data
/// directory. Initialization is best-effort and idempotent: if the data
/// directory cannot be created the subscriber is simply not installed
/// (observability is optional), and repeated calls leave the first
/// subscriber in place.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", "zest")]);

    let trace_file = data_dir.join("zest-otlp.json");
    let provider = tracer::create_tracer_provider(trace_file, resource);

    let tracer = provider.tracer("zest");
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
