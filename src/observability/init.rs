//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "roster-otlp.json";

/// Installs the global subscriber: an `EnvFilter` at `config.trace_level`
/// (default `"info"`) feeding an OpenTelemetry layer that writes OTLP JSON to
/// `<data dir>/roster-otlp.json`.
///
/// Returns the trace file path, or `None` when tracing could not be set up.
/// Observability is optional: a missing data directory or an already
/// installed subscriber leaves the plugin running without traces.
///
/// # Example
///
/// ```rust,no_run
/// use roster::observability::init_tracing;
/// use roster::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// if let Some(path) = init_tracing(&config) {
///     tracing::debug!(trace_file = %path.display(), "tracing is now active");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = crate::infrastructure::paths::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "Roster"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("roster.api_url", config.api_url.clone()),
    ]);

    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = exporter::file_tracer_provider(trace_file.clone(), resource);
    let tracer = provider.tracer(exporter::SCOPE_NAME);

    tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()
        .ok()?;

    Some(trace_file)
}
