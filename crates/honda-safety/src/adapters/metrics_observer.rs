//! Prometheus counters for safety decisions.
//!
//! Without the `metrics` feature every call compiles to a no-op.

use shared_types::{BusIndex, CanFrame};

use crate::domain::{AuthorityEvent, AuthorityState, HardwareVariant, Revocation};
use crate::error::TxViolation;
use crate::metrics;
use crate::ports::outbound::SafetyObserver;

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObserver;

impl SafetyObserver for MetricsObserver {
    fn initialized(&self, _variant: HardwareVariant) {
        metrics::set_controls_allowed(false);
    }

    fn frame_received(&self, _frame: &CanFrame) {
        metrics::record_rx_frame();
    }

    fn authority_changed(&self, _from: AuthorityState, to: AuthorityState, _cause: AuthorityEvent) {
        metrics::set_controls_allowed(to.is_enabled());
    }

    fn revoked(&self, _frame: &CanFrame, reason: Revocation, _latch_was: AuthorityState) {
        metrics::record_revocation(reason.as_str());
    }

    fn tx_rejected(&self, _frame: &CanFrame, violation: &TxViolation) {
        metrics::record_tx_rejected(violation.as_str());
    }

    fn forward_decided(&self, _frame: &CanFrame, _from: BusIndex, to: Option<BusIndex>) {
        metrics::record_forward(to.is_some());
    }
}
