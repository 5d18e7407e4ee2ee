//! Driven Ports (SPI - Outbound Dependencies)
//!
//! The safety context reports what it decided through a [`SafetyObserver`].
//! Observers must not feed back into the decision: they are called after
//! state has been fully updated.

use shared_types::{BusIndex, CanFrame};

use crate::domain::{AuthorityEvent, AuthorityState, HardwareVariant, Revocation};
use crate::error::TxViolation;

/// Receives safety decisions. Every method defaults to a no-op.
pub trait SafetyObserver: Send + Sync {
    /// Hooks were (re)initialized.
    fn initialized(&self, _variant: HardwareVariant) {}

    /// A frame was handed to the RX hook.
    fn frame_received(&self, _frame: &CanFrame) {}

    /// The latch changed value.
    fn authority_changed(&self, _from: AuthorityState, _to: AuthorityState, _cause: AuthorityEvent) {}

    /// A pedal revoked authority. `latch_was` is the value before the revoke.
    fn revoked(&self, _frame: &CanFrame, _reason: Revocation, _latch_was: AuthorityState) {}

    /// An outbound frame was suppressed.
    fn tx_rejected(&self, _frame: &CanFrame, _violation: &TxViolation) {}

    /// A relay decision was made.
    fn forward_decided(&self, _frame: &CanFrame, _from: BusIndex, _to: Option<BusIndex>) {}
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SafetyObserver for NoopObserver {}

/// Fan out to two observers, left first.
impl<A, B> SafetyObserver for (A, B)
where
    A: SafetyObserver,
    B: SafetyObserver,
{
    fn initialized(&self, variant: HardwareVariant) {
        self.0.initialized(variant);
        self.1.initialized(variant);
    }

    fn frame_received(&self, frame: &CanFrame) {
        self.0.frame_received(frame);
        self.1.frame_received(frame);
    }

    fn authority_changed(&self, from: AuthorityState, to: AuthorityState, cause: AuthorityEvent) {
        self.0.authority_changed(from, to, cause);
        self.1.authority_changed(from, to, cause);
    }

    fn revoked(&self, frame: &CanFrame, reason: Revocation, latch_was: AuthorityState) {
        self.0.revoked(frame, reason, latch_was);
        self.1.revoked(frame, reason, latch_was);
    }

    fn tx_rejected(&self, frame: &CanFrame, violation: &TxViolation) {
        self.0.tx_rejected(frame, violation);
        self.1.tx_rejected(frame, violation);
    }

    fn forward_decided(&self, frame: &CanFrame, from: BusIndex, to: Option<BusIndex>) {
        self.0.forward_decided(frame, from, to);
        self.1.forward_decided(frame, from, to);
    }
}
