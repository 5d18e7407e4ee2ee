//! Controls-allowed latch.
//!
//! State Machine:
//! ```text
//!                 set / resume button
//!   [DISABLED] ───────────────────────→ [ENABLED]
//!       ↑                                   │
//!       └──── cancel button / revoke / reset┘
//! ```
//!
//! Buttons are decoded by level, not edge: every frame carrying set, resume
//! or cancel re-applies its transition. Pedal revocations are edges (see
//! [`super::pedals`]). Nothing re-enables the latch except a fresh set or
//! resume frame.

use shared_types::CanFrame;
use std::fmt;

use super::ids::{BUTTONS_CIVIC_ID, BUTTONS_ILX_ID};
use super::pedals::Revocation;

/// Latch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthorityState {
    #[default]
    Disabled,
    Enabled,
}

impl AuthorityState {
    pub fn is_enabled(self) -> bool {
        matches!(self, AuthorityState::Enabled)
    }
}

impl From<bool> for AuthorityState {
    fn from(allowed: bool) -> Self {
        if allowed {
            AuthorityState::Enabled
        } else {
            AuthorityState::Disabled
        }
    }
}

impl fmt::Display for AuthorityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorityState::Disabled => f.write_str("disabled"),
            AuthorityState::Enabled => f.write_str("enabled"),
        }
    }
}

/// Cruise button field (bits 5..7 of byte 0) values that matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonCommand {
    Cancel,
    Set,
    Resume,
}

impl ButtonCommand {
    /// Decode the button frame, if `frame` is one and carries a command.
    pub fn decode(frame: &CanFrame) -> Option<Self> {
        if frame.id() != BUTTONS_ILX_ID && frame.id() != BUTTONS_CIVIC_ID {
            return None;
        }
        Self::from_field((frame.low_word() & 0xE0) >> 5)
    }

    pub fn from_field(field: u32) -> Option<Self> {
        match field {
            2 => Some(ButtonCommand::Cancel),
            3 => Some(ButtonCommand::Set),
            4 => Some(ButtonCommand::Resume),
            _ => None,
        }
    }
}

/// Inputs to the latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityEvent {
    Button(ButtonCommand),
    Revoked(Revocation),
    /// Forced value from the host (test harness / bring-up).
    Override(bool),
    /// Safety hooks re-initialized.
    Reset,
}

impl fmt::Display for AuthorityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorityEvent::Button(ButtonCommand::Cancel) => f.write_str("cancel_button"),
            AuthorityEvent::Button(ButtonCommand::Set) => f.write_str("set_button"),
            AuthorityEvent::Button(ButtonCommand::Resume) => f.write_str("resume_button"),
            AuthorityEvent::Revoked(reason) => write!(f, "revoked:{}", reason),
            AuthorityEvent::Override(_) => f.write_str("override"),
            AuthorityEvent::Reset => f.write_str("reset"),
        }
    }
}

/// The latch. Deterministic: same event sequence, same state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorityLatch {
    state: AuthorityState,
}

impl AuthorityLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AuthorityState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Apply an event and return the new state.
    pub fn process_event(&mut self, event: AuthorityEvent) -> AuthorityState {
        self.state = Self::next_state(self.state, event);
        self.state
    }

    /// Pure transition function.
    pub fn next_state(current: AuthorityState, event: AuthorityEvent) -> AuthorityState {
        match (current, event) {
            (_, AuthorityEvent::Button(ButtonCommand::Set | ButtonCommand::Resume)) => {
                AuthorityState::Enabled
            }
            (_, AuthorityEvent::Button(ButtonCommand::Cancel))
            | (_, AuthorityEvent::Revoked(_))
            | (_, AuthorityEvent::Reset) => AuthorityState::Disabled,
            (_, AuthorityEvent::Override(allowed)) => AuthorityState::from(allowed),
        }
    }
}
