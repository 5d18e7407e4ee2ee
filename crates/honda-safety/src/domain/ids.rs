//! Message identifiers and fixed thresholds for Honda vehicles.
//!
//! Ids are 11-bit standard identifiers as seen in `RIR >> 21`.

use shared_types::CanId;

// =============================================================================
// RX: vehicle state
// =============================================================================

/// Wheel speed frame; first two bytes carry ego speed.
pub const SPEED_ID: CanId = 0x158;

/// Cruise buttons on the ILX.
pub const BUTTONS_ILX_ID: CanId = 0x1A6;

/// Cruise buttons on the Civic Touring. Same layout as the ILX frame.
pub const BUTTONS_CIVIC_ID: CanId = 0x296;

/// User brake on Nidec (standalone) hardware, bit 53 of the frame.
pub const NIDEC_BRAKE_ID: CanId = 0x17C;

/// Bit 53 seen through the high register word.
pub const NIDEC_BRAKE_HIGH_MASK: u32 = 0x0020_0000;

/// User brake on Bosch (gateway) hardware, bit 4 of byte 0.
pub const BOSCH_BRAKE_ID: CanId = 0x1BE;

pub const BOSCH_BRAKE_LOW_MASK: u32 = 0x10;

/// Digital accelerator position, byte 0.
pub const GAS_PEDAL_ID: CanId = 0x17C;

/// Comma pedal interceptor. Bosch hardware reuses this id with 8 bytes.
pub const GAS_INTERCEPTOR_ID: CanId = 0x201;

/// Data length that identifies the interceptor frame.
pub const GAS_INTERCEPTOR_LEN: usize = 6;

/// Interceptor sample above which the pedal counts as pressed.
pub const GAS_INTERCEPTOR_THRESHOLD: u16 = 328;

// =============================================================================
// TX: actuation commands
// =============================================================================

pub const BRAKE_COMMAND_ID: CanId = 0x1FA;

/// Lane keep assist steering command.
pub const STEER_COMMAND_ID: CanId = 0xE4;

/// Steering command on the alternate platform.
pub const STEER_COMMAND_ALT_ID: CanId = 0x194;

pub const GAS_COMMAND_ID: CanId = 0x200;

// =============================================================================
// Forwarding
// =============================================================================

/// Vendor-reserved id that the gateway must never relay.
pub const GATEWAY_RESERVED_ID: CanId = 0x33D;
