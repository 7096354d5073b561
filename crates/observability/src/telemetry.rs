//! Subscriber initialization
//!
//! Composes an env filter, an optional console layer (plain or JSON) and an
//! optional sink layer into one global subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;
use crate::sink_layer::sink_layer;

/// Install the global subscriber described by `config`.
///
/// Fails with [`ObservabilityError::InitFailed`] when a global subscriber is
/// already installed.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = match &config.log_level {
        Some(level) => EnvFilter::try_new(level.as_str())
            .map_err(|e| ObservabilityError::Config(format!("invalid log filter '{}': {}", level, e)))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // Build layers separately, then compose once to avoid type mismatch
    let plain_layer = (config.enable_console && !config.json_output).then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let json_layer = (config.enable_console && config.json_output).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });

    Registry::default()
        .with(env_filter)
        .with(plain_layer)
        .with(json_layer)
        .with(sink_layer(config.log_sink.clone()))
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    tracing::debug!(
        service.name = %config.service_name,
        service.version = config.service_version.as_deref().unwrap_or("unknown"),
        json = config.json_output,
        "Logging initialized"
    );

    Ok(())
}

/// Initialize with configuration from environment variables
pub fn init_from_env() -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env())
}
