//! Bus relay policy.
//!
//! Only the gateway relays, and only between bus 1 and bus 2. Steering
//! commands and the vendor-reserved id are never relayed, so a steering
//! frame can never reach the actuation bus through the gateway even if the
//! outbound checks were bypassed.

use shared_types::{BusIndex, CanFrame, CanId};

use super::ids::{GATEWAY_RESERVED_ID, STEER_COMMAND_ID};
use super::variant::HardwareVariant;

/// Ids the gateway drops instead of relaying.
pub const GATEWAY_BLOCKED_IDS: [CanId; 2] = [STEER_COMMAND_ID, GATEWAY_RESERVED_ID];

/// Destination bus for `frame` seen on `bus`, or `None` to drop it.
pub fn forward_destination(
    variant: HardwareVariant,
    bus: BusIndex,
    frame: &CanFrame,
) -> Option<BusIndex> {
    match variant {
        HardwareVariant::Standalone => None,
        HardwareVariant::Gateway => match bus.get() {
            1 | 2 if !GATEWAY_BLOCKED_IDS.contains(&frame.id()) => {
                Some(BusIndex(!bus.get() & 0x3))
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(id: CanId) -> CanFrame {
        CanFrame::new(id, 0, &[0; 8]).unwrap()
    }

    #[test]
    fn test_standalone_never_forwards() {
        for bus in 0..4 {
            assert_eq!(
                forward_destination(HardwareVariant::Standalone, BusIndex(bus), &frame(0x100)),
                None
            );
        }
    }

    #[test]
    fn test_gateway_swaps_bus_one_and_two() {
        let v = HardwareVariant::Gateway;
        assert_eq!(forward_destination(v, BusIndex(1), &frame(0x100)), Some(BusIndex(2)));
        assert_eq!(forward_destination(v, BusIndex(2), &frame(0x100)), Some(BusIndex(1)));
    }

    #[test]
    fn test_gateway_blocks_steering_and_reserved() {
        let v = HardwareVariant::Gateway;
        for bus in [1, 2] {
            assert_eq!(forward_destination(v, BusIndex(bus), &frame(0xE4)), None);
            assert_eq!(forward_destination(v, BusIndex(bus), &frame(0x33D)), None);
        }
        // Alternate steering id is not on the block list.
        assert_eq!(forward_destination(v, BusIndex(1), &frame(0x194)), Some(BusIndex(2)));
    }

    #[test]
    fn test_gateway_ignores_other_buses() {
        let v = HardwareVariant::Gateway;
        assert_eq!(forward_destination(v, BusIndex(0), &frame(0x100)), None);
        assert_eq!(forward_destination(v, BusIndex(3), &frame(0x100)), None);
    }
}
