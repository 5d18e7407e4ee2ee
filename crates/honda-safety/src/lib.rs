//! # honda-safety
//!
//! CAN safety hooks for Honda vehicles: a message firewall between the
//! driver-assistance computer and the actuation bus.
//!
//! ## Overview
//!
//! - **Controls-allowed latch**: enabled by set/resume, cleared by cancel
//!   or any driver pedal override
//! - **Outbound masking**: brake, steering and gas commands are checked
//!   field by field against the latch and live pedal state
//! - **Bus forwarding**: Bosch gateways relay bus 1 <-> bus 2, never the
//!   steering command
//!
//! ## Architecture
//!
//! ```text
//!   RX frame ──→ VehicleStateTracker ──speed──┐
//!        │                                    ↓
//!        ├────→ ButtonCommand ──────────→ AuthorityLatch
//!        │                                    ↑
//!        └────→ PedalObserver ──revoke────────┘
//!
//!   TX frame ──→ OutboundGuard (latch && !pedal_pressed) ──→ allow / reject
//!   relay    ──→ forward_destination (variant) ──→ Some(bus) / None
//! ```
//!
//! - **Domain Layer** (`domain/`): pure bit-level logic, no I/O
//! - **Ports Layer** (`ports/`): the [`SafetyHooks`] table and the
//!   [`SafetyObserver`] reporting port
//! - **Adapters** (`adapters/`): tracing and metrics observers
//! - **Service** (`service.rs`): [`HondaSafety`], the context object that
//!   owns all state
//!
//! ## Example
//!
//! ```rust
//! use honda_safety::{HondaSafety, SafetyHooks};
//! use shared_types::CanFrame;
//!
//! let mut safety = HondaSafety::standalone();
//!
//! // Set button on the ILX button frame.
//! safety.on_rx(&CanFrame::new(0x1A6, 0, &[3 << 5, 0, 0, 0]).unwrap());
//! assert!(safety.controls_allowed());
//!
//! // Steering torque is allowed while controls are allowed...
//! let steer = CanFrame::new(0xE4, 0, &[0x00, 0x40, 0x00, 0x00]).unwrap();
//! assert!(safety.on_tx(&steer));
//!
//! // ...and suppressed after cancel.
//! safety.on_rx(&CanFrame::new(0x1A6, 0, &[2 << 5, 0, 0, 0]).unwrap());
//! assert!(!safety.on_tx(&steer));
//! ```
//!
//! ## Known gap
//!
//! Outbound ids that are not brake, steering or gas commands are allowed
//! unconditionally. A new actuation id must be added to
//! [`domain::outbound_guard`] or it bypasses filtering.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{MetricsObserver, TracingObserver};
pub use config::SafetyConfig;
pub use domain::{
    AuthorityEvent, AuthorityState, ButtonCommand, CommandKind, HardwareVariant, PedalState,
    Revocation,
};
pub use error::{ConfigError, ConfigResult, TxViolation};
pub use ports::inbound::{Ignition, SafetyHooks};
pub use ports::outbound::{NoopObserver, SafetyObserver};
pub use service::{HondaSafety, SharedSafety};
