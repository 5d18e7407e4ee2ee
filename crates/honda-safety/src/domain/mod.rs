//! Domain module for the Honda safety hooks
//!
//! Pure bit-level decisions; no logging, no I/O.
//!
//! ## Modules
//! - ids: message identifiers and thresholds
//! - variant: Nidec (standalone) vs Bosch (gateway) decode table
//! - vehicle_state: ego speed
//! - pedals: brake / gas history and revocations
//! - authority: controls-allowed latch
//! - outbound_guard: actuation masking on TX
//! - forwarding: gateway relay policy

pub mod authority;
pub mod forwarding;
pub mod ids;
pub mod outbound_guard;
pub mod pedals;
pub mod variant;
pub mod vehicle_state;

pub use authority::{AuthorityEvent, AuthorityLatch, AuthorityState, ButtonCommand};
pub use forwarding::{forward_destination, GATEWAY_BLOCKED_IDS};
pub use outbound_guard::{check_outbound, effective_authority, CommandKind};
pub use pedals::{rising_edge, PedalEvents, PedalObserver, PedalState, Revocation};
pub use variant::{HardwareVariant, RegisterWord, VariantLayout};
pub use vehicle_state::VehicleStateTracker;
