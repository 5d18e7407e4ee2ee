//! Structured logging of safety decisions.

use shared_types::{BusIndex, CanFrame};
use tracing::{debug, info, trace, warn};

use crate::domain::{AuthorityEvent, AuthorityState, HardwareVariant, Revocation};
use crate::error::TxViolation;
use crate::ports::outbound::SafetyObserver;

/// Logs through `tracing`.
///
/// Revocations are `warn` only when they actually took control away; a
/// brake press with the latch already off is routine and logs at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SafetyObserver for TracingObserver {
    fn initialized(&self, variant: HardwareVariant) {
        info!(%variant, "Honda safety hooks initialized");
    }

    fn frame_received(&self, frame: &CanFrame) {
        trace!(id = frame.id(), bus = %frame.bus(), len = frame.len(), "rx");
    }

    fn authority_changed(&self, from: AuthorityState, to: AuthorityState, cause: AuthorityEvent) {
        info!(%from, %to, %cause, "Controls allowed changed");
    }

    fn revoked(&self, frame: &CanFrame, reason: Revocation, latch_was: AuthorityState) {
        if latch_was.is_enabled() {
            warn!(id = frame.id(), bus = %frame.bus(), %reason, "Driver override, controls revoked");
        } else {
            debug!(id = frame.id(), %reason, "Pedal event with controls already disabled");
        }
    }

    fn tx_rejected(&self, frame: &CanFrame, violation: &TxViolation) {
        warn!(
            id = frame.id(),
            bus = %frame.bus(),
            reason = violation.as_str(),
            "Outbound frame suppressed: {}",
            violation
        );
    }

    fn forward_decided(&self, frame: &CanFrame, from: BusIndex, to: Option<BusIndex>) {
        match to {
            Some(dest) => trace!(id = frame.id(), %from, to = %dest, "forward"),
            None => debug!(id = frame.id(), %from, "Relay candidate dropped"),
        }
    }
}
