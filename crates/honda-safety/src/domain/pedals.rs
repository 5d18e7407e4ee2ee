//! Driver pedal observation.
//!
//! Three inputs can take control back from the automation:
//!
//! - **Brake**: rising edge, or held while the car is moving
//! - **Interceptor gas** (`0x201`, 6 bytes): analog sample crossing the threshold
//! - **Digital gas** (`0x17C` byte 0): rising edge, only while no interceptor
//!   has ever been seen
//!
//! The observer only reports [`Revocation`]s. Clearing the latch is the
//! authority state machine's job.

use shared_types::CanFrame;
use std::fmt;

use super::ids::{GAS_INTERCEPTOR_ID, GAS_INTERCEPTOR_LEN, GAS_INTERCEPTOR_THRESHOLD, GAS_PEDAL_ID};
use super::variant::VariantLayout;

/// False-to-true transition between two consecutive observations.
#[inline]
pub fn rising_edge(prev: bool, now: bool) -> bool {
    now && !prev
}

/// Why the driver took control back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Revocation {
    /// Brake went from released to pressed.
    BrakePressed,
    /// Brake still pressed while the vehicle is moving.
    BrakeWhileMoving,
    /// Digital accelerator went from zero to nonzero.
    GasPressed,
    /// Interceptor sample crossed above the threshold.
    InterceptorGasPressed,
}

impl Revocation {
    /// Stable label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Revocation::BrakePressed => "brake_pressed",
            Revocation::BrakeWhileMoving => "brake_while_moving",
            Revocation::GasPressed => "gas_pressed",
            Revocation::InterceptorGasPressed => "interceptor_gas_pressed",
        }
    }
}

impl fmt::Display for Revocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pedal history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PedalState {
    /// Last user brake bit.
    pub brake_prev: bool,
    /// Last digital gas byte. Frozen once the interceptor is detected.
    pub gas_prev: u8,
    /// Last interceptor sample.
    pub gas_interceptor_prev: u16,
    /// Sticky until the next init.
    pub interceptor_present: bool,
}

impl PedalState {
    /// Live (non-latched) pedal press used by the TX path.
    pub fn pedal_pressed(&self, speed: u16) -> bool {
        self.gas_prev != 0 || self.interceptor_pressed() || (self.brake_prev && speed != 0)
    }

    pub fn interceptor_pressed(&self) -> bool {
        self.gas_interceptor_prev > GAS_INTERCEPTOR_THRESHOLD
    }
}

/// Revocations raised by a single frame.
///
/// On Nidec hardware `0x17C` carries both the brake bit and the digital gas
/// byte, so one frame can produce two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PedalEvents {
    pub brake: Option<Revocation>,
    pub gas: Option<Revocation>,
}

impl PedalEvents {
    pub fn is_empty(&self) -> bool {
        self.brake.is_none() && self.gas.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = Revocation> {
        self.brake.into_iter().chain(self.gas)
    }
}

/// Tracks [`PedalState`] from RX frames.
#[derive(Debug, Clone)]
pub struct PedalObserver {
    layout: VariantLayout,
    state: PedalState,
}

impl PedalObserver {
    pub fn new(layout: VariantLayout) -> Self {
        Self {
            layout,
            state: PedalState::default(),
        }
    }

    pub fn state(&self) -> &PedalState {
        &self.state
    }

    /// Clear all history and adopt a (possibly different) layout.
    pub fn reset(&mut self, layout: VariantLayout) {
        self.layout = layout;
        self.state = PedalState::default();
    }

    /// Update pedal history from one frame. `speed` is the ego speed after
    /// this frame's own speed sample, if any, has been applied.
    pub fn on_frame(&mut self, frame: &CanFrame, speed: u16) -> PedalEvents {
        let mut events = PedalEvents::default();

        if self.layout.is_brake_frame(frame) {
            events.brake = self.observe_brake(self.layout.brake_pressed(frame), speed);
        }

        // Length disambiguates the interceptor from the Bosch 8-byte frame.
        if frame.id() == GAS_INTERCEPTOR_ID && frame.len() == GAS_INTERCEPTOR_LEN {
            self.state.interceptor_present = true;
            let sample = u16::from_be_bytes([frame.byte(0), frame.byte(1)]);
            events.gas = self.observe_interceptor(sample);
        }

        if !self.state.interceptor_present && frame.id() == GAS_PEDAL_ID {
            events.gas = self.observe_gas(frame.byte(0));
        }

        events
    }

    fn observe_brake(&mut self, brake: bool, speed: u16) -> Option<Revocation> {
        let prev = self.state.brake_prev;
        self.state.brake_prev = brake;

        if rising_edge(prev, brake) {
            Some(Revocation::BrakePressed)
        } else if brake && speed != 0 {
            Some(Revocation::BrakeWhileMoving)
        } else {
            None
        }
    }

    fn observe_interceptor(&mut self, sample: u16) -> Option<Revocation> {
        let prev = self.state.gas_interceptor_prev;
        self.state.gas_interceptor_prev = sample;

        rising_edge(prev > GAS_INTERCEPTOR_THRESHOLD, sample > GAS_INTERCEPTOR_THRESHOLD)
            .then_some(Revocation::InterceptorGasPressed)
    }

    fn observe_gas(&mut self, gas: u8) -> Option<Revocation> {
        let prev = self.state.gas_prev;
        self.state.gas_prev = gas;

        rising_edge(prev != 0, gas != 0).then_some(Revocation::GasPressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::variant::HardwareVariant;

    fn nidec_brake(pressed: bool) -> CanFrame {
        let mut payload = [0u8; 8];
        if pressed {
            payload[6] = 0x20;
        }
        CanFrame::new(0x17C, 0, &payload).unwrap()
    }

    fn interceptor(sample: u16) -> CanFrame {
        let [hi, lo] = sample.to_be_bytes();
        CanFrame::new(GAS_INTERCEPTOR_ID, 0, &[hi, lo, 0, 0, 0, 0]).unwrap()
    }

    fn gas(value: u8) -> CanFrame {
        CanFrame::new(GAS_PEDAL_ID, 0, &[value, 0, 0, 0, 0, 0, 0, 0]).unwrap()
    }

    fn observer(variant: HardwareVariant) -> PedalObserver {
        PedalObserver::new(variant.layout())
    }

    #[test]
    fn test_rising_edge() {
        assert!(rising_edge(false, true));
        assert!(!rising_edge(true, true));
        assert!(!rising_edge(false, false));
        assert!(!rising_edge(true, false));
    }

    #[test]
    fn test_brake_rising_edge_at_standstill() {
        let mut obs = observer(HardwareVariant::Standalone);
        assert_eq!(obs.on_frame(&nidec_brake(true), 0).brake, Some(Revocation::BrakePressed));
        // Held at standstill: no further revoke.
        assert_eq!(obs.on_frame(&nidec_brake(true), 0).brake, None);
        assert!(obs.state().brake_prev);
    }

    #[test]
    fn test_brake_held_while_moving() {
        let mut obs = observer(HardwareVariant::Standalone);
        obs.on_frame(&nidec_brake(true), 0);
        assert_eq!(
            obs.on_frame(&nidec_brake(true), 7).brake,
            Some(Revocation::BrakeWhileMoving)
        );
    }

    #[test]
    fn test_brake_release_updates_prev() {
        let mut obs = observer(HardwareVariant::Standalone);
        obs.on_frame(&nidec_brake(true), 0);
        assert_eq!(obs.on_frame(&nidec_brake(false), 7).brake, None);
        assert!(!obs.state().brake_prev);
    }

    #[test]
    fn test_gateway_uses_bosch_brake_frame() {
        let mut obs = observer(HardwareVariant::Gateway);
        assert!(obs.on_frame(&nidec_brake(true), 0).brake.is_none());

        let bosch = CanFrame::new(0x1BE, 0, &[0x10]).unwrap();
        assert_eq!(obs.on_frame(&bosch, 0).brake, Some(Revocation::BrakePressed));
    }

    #[test]
    fn test_interceptor_sample_is_big_endian() {
        let mut obs = observer(HardwareVariant::Standalone);
        let frame = CanFrame::new(GAS_INTERCEPTOR_ID, 0, &[0x01, 0x48, 0, 0, 0, 0]).unwrap();
        obs.on_frame(&frame, 0);
        assert_eq!(obs.state().gas_interceptor_prev, 0x0148);
        assert!(obs.state().interceptor_present);
    }

    #[test]
    fn test_interceptor_sequence_fires_once_on_crossing() {
        let mut obs = observer(HardwareVariant::Standalone);
        assert!(obs.on_frame(&interceptor(300), 0).is_empty());
        assert!(obs.on_frame(&interceptor(300), 0).is_empty());
        assert_eq!(
            obs.on_frame(&interceptor(340), 0).gas,
            Some(Revocation::InterceptorGasPressed)
        );
        // Level above threshold is not an edge.
        assert!(obs.on_frame(&interceptor(340), 0).is_empty());
    }

    #[test]
    fn test_interceptor_threshold_is_strict() {
        let mut obs = observer(HardwareVariant::Standalone);
        assert!(obs.on_frame(&interceptor(GAS_INTERCEPTOR_THRESHOLD), 0).is_empty());
        assert!(!obs.state().interceptor_pressed());
        assert!(!obs.on_frame(&interceptor(GAS_INTERCEPTOR_THRESHOLD + 1), 0).is_empty());
    }

    #[test]
    fn test_eight_byte_0x201_is_not_interceptor() {
        let mut obs = observer(HardwareVariant::Gateway);
        let bosch = CanFrame::new(GAS_INTERCEPTOR_ID, 0, &[0xFF; 8]).unwrap();
        assert!(obs.on_frame(&bosch, 0).is_empty());
        assert!(!obs.state().interceptor_present);
        assert_eq!(obs.state().gas_interceptor_prev, 0);
    }

    #[test]
    fn test_digital_gas_rising_edge() {
        let mut obs = observer(HardwareVariant::Gateway);
        assert!(obs.on_frame(&gas(0), 0).is_empty());
        assert_eq!(obs.on_frame(&gas(12), 0).gas, Some(Revocation::GasPressed));
        assert!(obs.on_frame(&gas(40), 0).is_empty());
        assert_eq!(obs.state().gas_prev, 40);
    }

    #[test]
    fn test_interceptor_silences_digital_gas() {
        let mut obs = observer(HardwareVariant::Gateway);
        obs.on_frame(&interceptor(0), 0);
        assert!(obs.on_frame(&gas(0), 0).is_empty());
        assert!(obs.on_frame(&gas(200), 0).is_empty());
        assert_eq!(obs.state().gas_prev, 0);
    }

    #[test]
    fn test_nidec_frame_can_revoke_twice() {
        let mut obs = observer(HardwareVariant::Standalone);
        let mut payload = [0u8; 8];
        payload[0] = 0x05;
        payload[6] = 0x20;
        let frame = CanFrame::new(0x17C, 0, &payload).unwrap();

        let events = obs.on_frame(&frame, 0);
        assert_eq!(
            events.iter().collect::<Vec<_>>(),
            vec![Revocation::BrakePressed, Revocation::GasPressed]
        );
    }

    #[test]
    fn test_pedal_pressed_live_flag() {
        let mut state = PedalState::default();
        assert!(!state.pedal_pressed(10));

        state.brake_prev = true;
        assert!(!state.pedal_pressed(0));
        assert!(state.pedal_pressed(1));

        state.brake_prev = false;
        state.gas_interceptor_prev = GAS_INTERCEPTOR_THRESHOLD + 1;
        assert!(state.pedal_pressed(0));

        state.gas_interceptor_prev = 0;
        state.gas_prev = 1;
        assert!(state.pedal_pressed(0));
    }

    #[test]
    fn test_reset_clears_sticky_interceptor() {
        let mut obs = observer(HardwareVariant::Standalone);
        obs.on_frame(&interceptor(500), 0);
        obs.reset(HardwareVariant::Gateway.layout());
        assert_eq!(*obs.state(), PedalState::default());
    }
}
