//! Tracing subscriber setup.

use super::tracer;
use crate::domain::error::Result;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and scope name on every exported span.
pub const SERVICE_NAME: &str = "RentDesk";

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "rentdesk-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` (default `info`) and an OpenTelemetry layer writing
/// to `rentdesk-otlp.json` in the plugin data directory.
///
/// Only the first call installs anything.
///
/// # Errors
///
/// [`crate::RentDeskError::Io`] if the data directory cannot be created.
pub fn init_tracing(config: &Config) -> Result<()> {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = crate::infrastructure::get_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
    Ok(())
}
