//! Hardware variant selection.
//!
//! Honda boards come in two topologies:
//!
//! | Variant | Hardware | Brake source | Relays frames |
//! |---------|----------|--------------|---------------|
//! | `Standalone` | Nidec | `0x17C` bit 53 | never |
//! | `Gateway` | Bosch | `0x1BE` bit 4 | bus 1 <-> bus 2 |
//!
//! Everything that differs between the two is resolved once into a
//! [`VariantLayout`] when the safety context is initialized, so the RX path
//! never branches on the variant inline.

use serde::{Deserialize, Serialize};
use shared_types::{CanFrame, CanId};
use std::fmt;
use std::str::FromStr;

use super::ids::{BOSCH_BRAKE_ID, BOSCH_BRAKE_LOW_MASK, NIDEC_BRAKE_HIGH_MASK, NIDEC_BRAKE_ID};
use crate::error::ConfigError;

/// Device topology.
///
/// Config files and `SAFETY_VARIANT` share the [`FromStr`] decode, so
/// `"Bosch"` means the same thing in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum HardwareVariant {
    /// Nidec hardware, single bus, no relaying.
    #[default]
    Standalone,
    /// Bosch hardware, relays between bus 1 and bus 2.
    Gateway,
}

impl HardwareVariant {
    /// Decode table for this variant.
    pub const fn layout(self) -> VariantLayout {
        match self {
            HardwareVariant::Standalone => VariantLayout {
                brake_id: NIDEC_BRAKE_ID,
                brake_word: RegisterWord::High,
                brake_mask: NIDEC_BRAKE_HIGH_MASK,
            },
            HardwareVariant::Gateway => VariantLayout {
                brake_id: BOSCH_BRAKE_ID,
                brake_word: RegisterWord::Low,
                brake_mask: BOSCH_BRAKE_LOW_MASK,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HardwareVariant::Standalone => "standalone",
            HardwareVariant::Gateway => "gateway",
        }
    }
}

impl fmt::Display for HardwareVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HardwareVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standalone" | "nidec" => Ok(HardwareVariant::Standalone),
            "gateway" | "bosch" => Ok(HardwareVariant::Gateway),
            other => Err(ConfigError::InvalidVariant(other.to_string())),
        }
    }
}

impl TryFrom<String> for HardwareVariant {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Which 32-bit payload register a field lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterWord {
    /// Bytes 0..4 (`RDLR`).
    Low,
    /// Bytes 4..8 (`RDHR`).
    High,
}

impl RegisterWord {
    fn read(self, frame: &CanFrame) -> u32 {
        match self {
            RegisterWord::Low => frame.low_word(),
            RegisterWord::High => frame.high_word(),
        }
    }
}

/// Variant-specific ids and bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantLayout {
    pub brake_id: CanId,
    pub brake_word: RegisterWord,
    pub brake_mask: u32,
}

impl VariantLayout {
    /// True if `frame` carries the user brake signal for this variant.
    pub fn is_brake_frame(&self, frame: &CanFrame) -> bool {
        frame.id() == self.brake_id
    }

    /// Decode the user brake bit. Only meaningful when
    /// [`Self::is_brake_frame`] holds.
    pub fn brake_pressed(&self, frame: &CanFrame) -> bool {
        self.brake_word.read(frame) & self.brake_mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standalone_brake_is_bit_53() {
        let layout = HardwareVariant::Standalone.layout();
        let mut payload = [0u8; 8];
        // bit 53 = byte 6, bit 5
        payload[6] = 0x20;
        let frame = CanFrame::new(0x17C, 0, &payload).unwrap();
        assert!(layout.is_brake_frame(&frame));
        assert!(layout.brake_pressed(&frame));

        payload[6] = 0xDF;
        let frame = CanFrame::new(0x17C, 0, &payload).unwrap();
        assert!(!layout.brake_pressed(&frame));
    }

    #[test]
    fn test_gateway_brake_is_byte0_bit4() {
        let layout = HardwareVariant::Gateway.layout();
        let frame = CanFrame::new(0x1BE, 0, &[0x10]).unwrap();
        assert!(layout.is_brake_frame(&frame));
        assert!(layout.brake_pressed(&frame));

        let frame = CanFrame::new(0x1BE, 0, &[0xEF, 0xFF, 0xFF, 0xFF]).unwrap();
        assert!(!layout.brake_pressed(&frame));

        let nidec_frame = CanFrame::new(0x17C, 0, &[0x10]).unwrap();
        assert!(!layout.is_brake_frame(&nidec_frame));
    }

    #[test]
    fn test_variant_parse_aliases() {
        assert_eq!("nidec".parse::<HardwareVariant>().unwrap(), HardwareVariant::Standalone);
        assert_eq!(" Bosch ".parse::<HardwareVariant>().unwrap(), HardwareVariant::Gateway);
        assert_eq!("gateway".parse::<HardwareVariant>().unwrap(), HardwareVariant::Gateway);
        assert!(matches!(
            "toyota".parse::<HardwareVariant>(),
            Err(ConfigError::InvalidVariant(v)) if v == "toyota"
        ));
    }

    #[test]
    fn test_default_is_standalone() {
        assert_eq!(HardwareVariant::default(), HardwareVariant::Standalone);
    }
}
