//! Ego speed tracking.

use shared_types::CanFrame;

use super::ids::SPEED_ID;

/// Latest speed sample seen on the bus, in raw wheel-speed units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VehicleStateTracker {
    speed: u16,
}

impl VehicleStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample speed from the wheel speed frame. Returns true if the frame
    /// was a speed frame.
    pub fn on_frame(&mut self, frame: &CanFrame) -> bool {
        if frame.id() != SPEED_ID {
            return false;
        }
        self.speed = (frame.low_word() & 0xFFFF) as u16;
        true
    }

    pub fn speed(&self) -> u16 {
        self.speed
    }

    pub fn is_moving(&self) -> bool {
        self.speed != 0
    }

    pub fn reset(&mut self) {
        self.speed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_first_two_bytes_little_endian() {
        let mut tracker = VehicleStateTracker::new();
        let frame = CanFrame::new(SPEED_ID, 0, &[0x34, 0x12, 0xFF, 0xFF, 0, 0, 0, 0]).unwrap();
        assert!(tracker.on_frame(&frame));
        assert_eq!(tracker.speed(), 0x1234);
        assert!(tracker.is_moving());
    }

    #[test]
    fn test_other_ids_ignored() {
        let mut tracker = VehicleStateTracker::new();
        tracker.on_frame(&CanFrame::new(SPEED_ID, 0, &[5, 0]).unwrap());

        let other = CanFrame::new(0x159, 0, &[9, 9]).unwrap();
        assert!(!tracker.on_frame(&other));
        assert_eq!(tracker.speed(), 5);
    }

    #[test]
    fn test_zero_sample_stops() {
        let mut tracker = VehicleStateTracker::new();
        tracker.on_frame(&CanFrame::new(SPEED_ID, 0, &[5, 0]).unwrap());
        tracker.on_frame(&CanFrame::new(SPEED_ID, 0, &[0, 0]).unwrap());
        assert!(!tracker.is_moving());
    }
}
