//! Honda safety context - wires the domain to the hook table
//!
//! [`HondaSafety`] owns every piece of state the hooks touch: variant,
//! speed, pedal history and the latch. The RX path is the only writer.
//!
//! RX order per frame:
//! 1. speed sample
//! 2. cruise buttons (level decode)
//! 3. brake, interceptor, digital gas (edge decode)

use parking_lot::Mutex;
use shared_types::{BusIndex, CanFrame};
use std::sync::Arc;

use crate::config::SafetyConfig;
use crate::domain::{
    check_outbound, effective_authority, forward_destination, AuthorityEvent, AuthorityLatch,
    AuthorityState, ButtonCommand, HardwareVariant, PedalObserver, PedalState,
    VehicleStateTracker,
};
use crate::error::TxViolation;
use crate::ports::inbound::{Ignition, SafetyHooks};
use crate::ports::outbound::{NoopObserver, SafetyObserver};

/// Safety context for one Honda safety mode.
#[derive(Debug)]
pub struct HondaSafety<O: SafetyObserver = NoopObserver> {
    variant: HardwareVariant,
    vehicle: VehicleStateTracker,
    pedals: PedalObserver,
    authority: AuthorityLatch,
    observer: O,
}

impl HondaSafety<NoopObserver> {
    /// Hooks for the given variant, reporting nothing.
    pub fn new(variant: HardwareVariant) -> Self {
        Self::with_observer(variant, NoopObserver)
    }

    /// Nidec hooks: no relaying, brake on `0x17C`.
    pub fn standalone() -> Self {
        Self::new(HardwareVariant::Standalone)
    }

    /// Bosch hooks: relays bus 1 <-> bus 2, brake on `0x1BE`.
    pub fn gateway() -> Self {
        Self::new(HardwareVariant::Gateway)
    }
}

impl<O: SafetyObserver> HondaSafety<O> {
    /// Initialized hooks that report decisions to `observer`.
    pub fn with_observer(variant: HardwareVariant, observer: O) -> Self {
        let mut safety = Self {
            variant,
            vehicle: VehicleStateTracker::new(),
            pedals: PedalObserver::new(variant.layout()),
            authority: AuthorityLatch::new(),
            observer,
        };
        safety.init(variant);
        safety
    }

    pub fn from_config(config: &SafetyConfig, observer: O) -> Self {
        Self::with_observer(config.variant, observer)
    }

    /// Firmware-style init: the mode parameter is accepted and ignored, the
    /// variant stays as selected.
    pub fn init_with_param(&mut self, _param: i16) {
        self.init(self.variant);
    }

    pub fn variant(&self) -> HardwareVariant {
        self.variant
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub fn authority(&self) -> AuthorityState {
        self.authority.state()
    }

    pub fn controls_allowed(&self) -> bool {
        self.authority.is_enabled()
    }

    pub fn ego_speed(&self) -> u16 {
        self.vehicle.speed()
    }

    pub fn pedal_state(&self) -> &PedalState {
        self.pedals.state()
    }

    pub fn brake_prev(&self) -> bool {
        self.pedals.state().brake_prev
    }

    pub fn gas_prev(&self) -> u8 {
        self.pedals.state().gas_prev
    }

    pub fn gas_interceptor_prev(&self) -> u16 {
        self.pedals.state().gas_interceptor_prev
    }

    pub fn interceptor_detected(&self) -> bool {
        self.pedals.state().interceptor_present
    }

    /// Latch AND no pedal pressed right now.
    pub fn effective_authority(&self) -> bool {
        effective_authority(self.authority.state(), self.pedals.state(), self.vehicle.speed())
    }

    // =========================================================================
    // Host control
    // =========================================================================

    /// Force the latch. Used by test harnesses and bench bring-up.
    pub fn set_controls_allowed(&mut self, allowed: bool) {
        self.apply(AuthorityEvent::Override(allowed));
    }

    /// Outbound check with the reason for a rejection. Does not report to
    /// the observer; [`SafetyHooks::on_tx`] does.
    pub fn evaluate_outbound(&self, frame: &CanFrame) -> Result<(), TxViolation> {
        check_outbound(frame, self.effective_authority())
    }

    fn apply(&mut self, event: AuthorityEvent) -> AuthorityState {
        let from = self.authority.state();
        let to = self.authority.process_event(event);
        if from != to {
            self.observer.authority_changed(from, to, event);
        }
        to
    }
}

impl<O: SafetyObserver> SafetyHooks for HondaSafety<O> {
    fn init(&mut self, variant: HardwareVariant) {
        self.variant = variant;
        self.vehicle.reset();
        self.pedals.reset(variant.layout());
        self.apply(AuthorityEvent::Reset);
        self.observer.initialized(variant);
    }

    fn on_rx(&mut self, frame: &CanFrame) {
        self.observer.frame_received(frame);

        self.vehicle.on_frame(frame);

        if let Some(command) = ButtonCommand::decode(frame) {
            self.apply(AuthorityEvent::Button(command));
        }

        let events = self.pedals.on_frame(frame, self.vehicle.speed());
        for reason in events.iter() {
            let latch_was = self.authority.state();
            self.apply(AuthorityEvent::Revoked(reason));
            self.observer.revoked(frame, reason, latch_was);
        }
    }

    fn on_tx(&self, frame: &CanFrame) -> bool {
        match self.evaluate_outbound(frame) {
            Ok(()) => true,
            Err(violation) => {
                self.observer.tx_rejected(frame, &violation);
                false
            }
        }
    }

    fn on_tx_lin(&self, _channel: u8, _data: &[u8]) -> bool {
        true
    }

    fn on_ignition(&self) -> Ignition {
        Ignition::Unknown
    }

    fn on_forward(&self, bus: BusIndex, frame: &CanFrame) -> Option<BusIndex> {
        let to = forward_destination(self.variant, bus, frame);
        self.observer.forward_decided(frame, bus, to);
        to
    }
}

/// [`HondaSafety`] behind a lock, for hosts that deliver frames from more
/// than one context (e.g. an RX interrupt and a TX poll loop).
///
/// Every hook holds the lock for its full duration, so frames are still
/// processed one at a time.
#[derive(Debug)]
pub struct SharedSafety<O: SafetyObserver = NoopObserver> {
    inner: Arc<Mutex<HondaSafety<O>>>,
}

impl<O: SafetyObserver> Clone for SharedSafety<O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<O: SafetyObserver> SharedSafety<O> {
    pub fn new(safety: HondaSafety<O>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(safety)),
        }
    }

    pub fn init(&self, variant: HardwareVariant) {
        self.inner.lock().init(variant);
    }

    pub fn on_rx(&self, frame: &CanFrame) {
        self.inner.lock().on_rx(frame);
    }

    pub fn on_tx(&self, frame: &CanFrame) -> bool {
        self.inner.lock().on_tx(frame)
    }

    pub fn on_tx_lin(&self, channel: u8, data: &[u8]) -> bool {
        self.inner.lock().on_tx_lin(channel, data)
    }

    pub fn on_ignition(&self) -> Ignition {
        self.inner.lock().on_ignition()
    }

    pub fn on_forward(&self, bus: BusIndex, frame: &CanFrame) -> Option<BusIndex> {
        self.inner.lock().on_forward(bus, frame)
    }

    pub fn controls_allowed(&self) -> bool {
        self.inner.lock().controls_allowed()
    }

    /// Run `f` with exclusive access to the context.
    pub fn with<R>(&self, f: impl FnOnce(&mut HondaSafety<O>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
