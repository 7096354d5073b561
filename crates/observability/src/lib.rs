//! textfill observability - logging setup and span helpers
//!
//! Every textfill crate logs through `tracing`. This crate owns the subscriber
//! setup for binaries and the span/recording helpers used around generation.
//!
//! # Quick Start
//!
//! ```no_run
//! use textfill_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("textfill")
//!     .with_log_level("textfill_llm=debug,info");
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), textfill_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `TEXTFILL_LOG` or `RUST_LOG` - Log level filter
//! - `TEXTFILL_LOG_JSON` - `1`/`true` switches console output to JSON lines

pub mod config;
pub mod error;
pub mod sink_layer;
pub mod telemetry;
pub mod spans;

pub use config::{LogSink, ObservabilityConfig};
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env};
pub use spans::{record_duration, record_error};

// generation_span!() is exported via #[macro_export]
