//! # Identity Telemetry
//!
//! Structured logging for the identity ledger crates.
//!
//! The library crates only emit `tracing` events; this crate installs the
//! subscriber that renders them, either human-readable or as JSON lines for
//! log shippers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use identity_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ID_SERVICE_NAME` | `identity-ledger` | Service name on every log line |
//! | `ID_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `ID_JSON_LOGS` | `false` | Emit JSON instead of text |
//! | `ID_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {filter:?}: {reason}")]
    Filter { filter: String, reason: String },

    #[error("Failed to install the global subscriber: {0}")]
    SubscriberInit(String),
}
