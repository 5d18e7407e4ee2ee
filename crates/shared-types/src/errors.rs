//! # Error Types
//!
//! Errors raised while building frames.

use thiserror::Error;

/// Errors that can occur when constructing a [`crate::CanFrame`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Classic CAN carries at most eight data bytes.
    #[error("Payload too long: {len} bytes, maximum is 8")]
    PayloadTooLong { len: usize },

    /// Identifier does not fit in 29 bits.
    #[error("Arbitration id out of range: {id:#x}")]
    IdOutOfRange { id: u32 },
}
