//! # Ports Layer
//!
//! - **Inbound (Driving)**: the hook table the CAN driver calls
//! - **Outbound (Driven)**: where decisions are reported

pub mod inbound;
pub mod outbound;
