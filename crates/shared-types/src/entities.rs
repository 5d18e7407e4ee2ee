//! # Frame Entities
//!
//! A single classic-CAN frame plus the bus it was seen on.
//!
//! Payload bytes beyond the data length are always zero, so the word
//! accessors never leak stale bytes from a previous frame.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::FrameError;

/// Arbitration identifier (11-bit standard or 29-bit extended).
pub type CanId = u32;

/// Largest identifier an extended frame can carry.
pub const MAX_EXTENDED_ID: CanId = 0x1FFF_FFFF;

/// Classic CAN payload capacity.
pub const MAX_PAYLOAD_LEN: usize = 8;

/// Index of a physical bus segment on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct BusIndex(pub u8);

impl BusIndex {
    /// Raw bus number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<u8> for BusIndex {
    fn from(bus: u8) -> Self {
        Self(bus)
    }
}

impl fmt::Display for BusIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One CAN frame.
///
/// Deserialization goes through [`CanFrame::new`], so a decoded frame obeys
/// the same length and id limits as a constructed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCanFrame", into = "RawCanFrame")]
pub struct CanFrame {
    id: CanId,
    data: [u8; MAX_PAYLOAD_LEN],
    len: u8,
    bus: BusIndex,
}

impl CanFrame {
    /// Build a frame from an identifier, source bus and payload.
    ///
    /// # Errors
    ///
    /// - [`FrameError::PayloadTooLong`] if `payload` has more than 8 bytes
    /// - [`FrameError::IdOutOfRange`] if `id` needs more than 29 bits
    pub fn new(id: CanId, bus: impl Into<BusIndex>, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLong { len: payload.len() });
        }
        if id > MAX_EXTENDED_ID {
            return Err(FrameError::IdOutOfRange { id });
        }

        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);

        Ok(Self {
            id,
            data,
            len: payload.len() as u8,
            bus: bus.into(),
        })
    }

    /// Build a frame from the bxCAN receive FIFO mailbox registers.
    ///
    /// `RIR >> 21` is the standard identifier and the low nibble of `RDTR`
    /// is the data length code. DLC values above 8 are clamped to 8, as the
    /// peripheral does.
    pub fn from_mailbox(rir: u32, rdtr: u32, rdlr: u32, rdhr: u32, bus: impl Into<BusIndex>) -> Self {
        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[..4].copy_from_slice(&rdlr.to_le_bytes());
        data[4..].copy_from_slice(&rdhr.to_le_bytes());

        let len = ((rdtr & 0xF) as u8).min(MAX_PAYLOAD_LEN as u8);
        for byte in data.iter_mut().skip(len as usize) {
            *byte = 0;
        }

        Self {
            id: rir >> 21,
            data,
            len,
            bus: bus.into(),
        }
    }

    /// Arbitration identifier.
    pub fn id(&self) -> CanId {
        self.id
    }

    /// Source bus.
    pub fn bus(&self) -> BusIndex {
        self.bus
    }

    /// Data length (0..=8).
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True for a zero-length frame.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The payload bytes actually carried by the frame.
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len as usize]
    }

    /// Byte `index` of the payload, zero if past the data length.
    pub fn byte(&self, index: usize) -> u8 {
        self.data.get(index).copied().unwrap_or(0)
    }

    /// Bytes 0..4 as a little-endian word (`RDLR`).
    pub fn low_word(&self) -> u32 {
        u32::from_le_bytes([self.data[0], self.data[1], self.data[2], self.data[3]])
    }

    /// Bytes 4..8 as a little-endian word (`RDHR`).
    pub fn high_word(&self) -> u32 {
        u32::from_le_bytes([self.data[4], self.data[5], self.data[6], self.data[7]])
    }
}

/// Serialized form of [`CanFrame`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCanFrame {
    id: CanId,
    data: [u8; MAX_PAYLOAD_LEN],
    len: u8,
    bus: BusIndex,
}

impl TryFrom<RawCanFrame> for CanFrame {
    type Error = FrameError;

    fn try_from(raw: RawCanFrame) -> Result<Self, Self::Error> {
        let len = raw.len as usize;
        if len > MAX_PAYLOAD_LEN {
            return Err(FrameError::PayloadTooLong { len });
        }
        CanFrame::new(raw.id, raw.bus, &raw.data[..len])
    }
}

impl From<CanFrame> for RawCanFrame {
    fn from(frame: CanFrame) -> Self {
        Self {
            id: frame.id,
            data: frame.data,
            len: frame.len,
            bus: frame.bus,
        }
    }
}

impl fmt::Display for CanFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bus{} {:#05x} [{}]", self.bus, self.id, self.len)?;
        for byte in self.payload() {
            write!(f, " {:02x}", byte)?;
        }
        Ok(())
    }
}
