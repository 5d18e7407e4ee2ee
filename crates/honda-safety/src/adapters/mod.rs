//! # Adapters Layer
//!
//! [`SafetyObserver`](crate::ports::outbound::SafetyObserver) implementations.

pub mod metrics_observer;
pub mod tracing_observer;

pub use metrics_observer::MetricsObserver;
pub use tracing_observer::TracingObserver;
