//! # safety-replay
//!
//! Host-side replay of recorded CAN traffic through the Honda safety hooks.
//! Useful for checking a capture against the firewall before it is flashed,
//! and for reproducing a field report frame by frame.
//!
//! ```text
//! trace file ──→ parse_trace ──→ Replayer ──→ HondaSafety hooks
//!                                    │
//!                                    └──→ ReplaySummary (JSON)
//! ```

pub mod replay;
pub mod trace;

pub use replay::{Decision, ReplaySummary, Replayer};
pub use trace::{parse_line, parse_trace, Direction, TraceError, TraceRecord};
