//! Configuration for logging

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Sink for formatted log lines (e.g. a CLI verbose pane). Called from the
/// tracing layer; must not block.
pub type LogSink = Arc<dyn Fn(String) + Send + Sync>;

/// Logging configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name attached to the startup event
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional)
    #[serde(default)]
    pub service_version: Option<String>,

    /// Log filter directive (e.g. "info", "textfill_llm=debug").
    /// Falls back to `RUST_LOG`, then "info".
    #[serde(default)]
    pub log_level: Option<String>,

    /// Write formatted events to stderr
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// Use JSON lines instead of the human-readable format
    #[serde(default)]
    pub json_output: bool,

    /// Optional sink for each formatted log line. Not serialized.
    #[serde(skip)]
    pub log_sink: Option<LogSink>,
}

fn default_service_name() -> String {
    "textfill".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            log_level: None,
            enable_console: true,
            json_output: false,
            log_sink: None,
        }
    }
}

impl std::fmt::Debug for ObservabilityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservabilityConfig")
            .field("service_name", &self.service_name)
            .field("service_version", &self.service_version)
            .field("log_level", &self.log_level)
            .field("enable_console", &self.enable_console)
            .field("json_output", &self.json_output)
            .field("log_sink", &self.log_sink.as_ref().map(|_| "Some(LogSink)"))
            .finish()
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    pub fn with_json_output(mut self, enable: bool) -> Self {
        self.json_output = enable;
        self
    }

    pub fn with_log_sink(mut self, sink: LogSink) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `TEXTFILL_LOG` or `RUST_LOG` → log_level
    /// - `TEXTFILL_LOG_JSON` → json_output
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("TEXTFILL_LOG").or_else(|| lookup("RUST_LOG"));
        let json_output = lookup("TEXTFILL_LOG_JSON")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            log_level,
            json_output,
            ..Default::default()
        }
    }
}
