//! # Safety Telemetry
//!
//! Structured logging setup shared by the safety host tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use safety_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // Hook decisions from `TracingObserver` are now emitted.
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SAFETY_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `SAFETY_JSON_LOGS` | `false` | JSON lines instead of human format |
//! | `SAFETY_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `SAFETY_SERVICE_NAME` | `safety-gate` | Name on the startup event |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{directive}': {reason}")]
    Filter { directive: String, reason: String },

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}
