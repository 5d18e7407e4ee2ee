//! # Shared Types Crate
//!
//! The wire representation of a CAN frame as seen by the safety core.
//!
//! ## Design Principles
//!
//! - **Immutable frames**: a `CanFrame` cannot change after construction.
//! - **Register-faithful words**: payload decoding works on the two 32-bit
//!   little-endian words the bxCAN peripheral exposes (`RDLR`/`RDHR`), so
//!   masks written against the hardware registers apply unchanged.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
