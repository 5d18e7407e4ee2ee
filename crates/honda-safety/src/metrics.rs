//! # Safety Metrics
//!
//! Prometheus metrics for the safety hooks.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! honda-safety = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `safety_rx_frames_total` - Counter of frames seen by the RX hook
//! - `safety_tx_rejected_total` - Counter of suppressed TX frames (by reason)
//! - `safety_revocations_total` - Counter of pedal revocations (by reason)
//! - `safety_forwarded_total` - Counter of relayed frames
//! - `safety_forward_dropped_total` - Counter of relay candidates dropped
//! - `safety_controls_allowed` - Gauge of the latch (0=disabled, 1=enabled)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_gauge, register_int_counter, register_int_counter_vec, Gauge, IntCounter,
    IntCounterVec,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Frames seen by the RX hook
    pub static ref RX_FRAMES: IntCounter = register_int_counter!(
        "safety_rx_frames_total",
        "Total number of frames seen by the RX hook"
    )
    .expect("Failed to create RX_FRAMES metric");

    /// Suppressed TX frames, labeled by reason
    pub static ref TX_REJECTED: IntCounterVec = register_int_counter_vec!(
        "safety_tx_rejected_total",
        "Total number of outbound frames suppressed",
        &["reason"]
    )
    .expect("Failed to create TX_REJECTED metric");

    /// Pedal revocations, labeled by reason
    pub static ref REVOCATIONS: IntCounterVec = register_int_counter_vec!(
        "safety_revocations_total",
        "Total number of pedal revocations",
        &["reason"]
    )
    .expect("Failed to create REVOCATIONS metric");

    /// Relayed frames
    pub static ref FORWARDED: IntCounter = register_int_counter!(
        "safety_forwarded_total",
        "Total number of frames relayed between buses"
    )
    .expect("Failed to create FORWARDED metric");

    /// Dropped relay candidates
    pub static ref FORWARD_DROPPED: IntCounter = register_int_counter!(
        "safety_forward_dropped_total",
        "Total number of relay candidates dropped"
    )
    .expect("Failed to create FORWARD_DROPPED metric");

    /// Latch value
    pub static ref CONTROLS_ALLOWED: Gauge = register_gauge!(
        "safety_controls_allowed",
        "Controls-allowed latch (0=disabled, 1=enabled)"
    )
    .expect("Failed to create CONTROLS_ALLOWED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

#[cfg(feature = "metrics")]
pub fn record_rx_frame() {
    RX_FRAMES.inc();
}

#[cfg(feature = "metrics")]
pub fn record_tx_rejected(reason: &str) {
    TX_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_revocation(reason: &str) {
    REVOCATIONS.with_label_values(&[reason]).inc();
}

/// Record a relay decision
#[cfg(feature = "metrics")]
pub fn record_forward(forwarded: bool) {
    if forwarded {
        FORWARDED.inc();
    } else {
        FORWARD_DROPPED.inc();
    }
}

#[cfg(feature = "metrics")]
pub fn set_controls_allowed(allowed: bool) {
    CONTROLS_ALLOWED.set(if allowed { 1.0 } else { 0.0 });
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_rx_frame() {}

#[cfg(not(feature = "metrics"))]
pub fn record_tx_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_revocation(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_forward(_forwarded: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn set_controls_allowed(_allowed: bool) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_callable_in_any_build() {
        record_rx_frame();
        record_tx_rejected("unauthorized_steer");
        record_revocation("brake_pressed");
        record_forward(true);
        record_forward(false);
        set_controls_allowed(true);
    }
}
