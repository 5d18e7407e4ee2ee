//! # Inbound Ports (Driving Ports / API)
//!
//! The hook table a safety mode exposes to the CAN driver.

use shared_types::{BusIndex, CanFrame};

use crate::domain::HardwareVariant;

/// Ignition line as reported by a safety mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ignition {
    /// Mode does not know; the board falls back to its own ignition sense.
    #[default]
    Unknown,
    Off,
    On,
}

/// Safety hooks.
///
/// Frames are delivered one at a time and each call runs to completion
/// before the next; RX takes `&mut self` so that ordering is enforced by
/// the borrow checker. None of these calls block.
pub trait SafetyHooks {
    /// Reset all state and select the hardware variant.
    fn init(&mut self, variant: HardwareVariant);

    /// Observe a received frame. Never fails.
    fn on_rx(&mut self, frame: &CanFrame);

    /// True to transmit `frame`, false to suppress it.
    fn on_tx(&self, frame: &CanFrame) -> bool;

    /// LIN transmit check. Not implemented for Honda: always allows.
    fn on_tx_lin(&self, channel: u8, data: &[u8]) -> bool;

    /// Ignition state as decoded from the bus.
    fn on_ignition(&self) -> Ignition;

    /// Destination bus for a relay candidate seen on `bus`, or `None`.
    fn on_forward(&self, bus: BusIndex, frame: &CanFrame) -> Option<BusIndex>;
}
