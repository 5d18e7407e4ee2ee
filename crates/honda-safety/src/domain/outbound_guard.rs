//! Outbound actuation checks.
//!
//! | Command | Authorized | Not authorized |
//! |---------|------------|----------------|
//! | brake `0x1FA` | `RDLR & 0xFFFFFF3F == RDLR` | `RDLR & 0xFFFF0000 == RDLR` |
//! | steer `0xE4`, `0x194` | anything | `RDLR & 0xFFFF0000 == RDLR` |
//! | gas `0x200` | anything | `RDLR & 0xFFFF0000 == RDLR` |
//! | other | allowed | allowed |
//!
//! "Authorized" is the latch AND no pedal pressed right now. A pressed pedal
//! masks an enabled latch for the one check without touching the latch.
//!
//! Unrecognized ids are allowed. Any actuation id that is not listed here
//! therefore bypasses filtering; adding a command id means adding it here.

use shared_types::{CanFrame, CanId};
use std::fmt;

use super::authority::AuthorityState;
use super::ids::{BRAKE_COMMAND_ID, GAS_COMMAND_ID, STEER_COMMAND_ALT_ID, STEER_COMMAND_ID};
use super::pedals::PedalState;
use crate::error::TxViolation;

/// Bits a brake command may set while authorized (clears 0x40 and 0x80 of byte 0).
pub const BRAKE_AUTHORIZED_MASK: u32 = 0xFFFF_FF3F;

/// Bits any command may set while not authorized (bytes 0 and 1 must be zero).
pub const UNAUTHORIZED_MASK: u32 = 0xFFFF_0000;

/// Actuation channel of an outbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Brake,
    Steer,
    Gas,
}

impl CommandKind {
    pub fn classify(id: CanId) -> Option<Self> {
        match id {
            BRAKE_COMMAND_ID => Some(CommandKind::Brake),
            STEER_COMMAND_ID | STEER_COMMAND_ALT_ID => Some(CommandKind::Steer),
            GAS_COMMAND_ID => Some(CommandKind::Gas),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::Brake => "brake",
            CommandKind::Steer => "steer",
            CommandKind::Gas => "gas",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latch AND not pedal-pressed, evaluated at the instant of the check.
pub fn effective_authority(latch: AuthorityState, pedals: &PedalState, speed: u16) -> bool {
    latch.is_enabled() && !pedals.pedal_pressed(speed)
}

/// Field-level policy for one outbound frame.
pub fn check_outbound(frame: &CanFrame, authorized: bool) -> Result<(), TxViolation> {
    let Some(kind) = CommandKind::classify(frame.id()) else {
        return Ok(());
    };
    let word = frame.low_word();

    match (kind, authorized) {
        (CommandKind::Brake, true) => {
            if word & BRAKE_AUTHORIZED_MASK != word {
                return Err(TxViolation::BrakeReservedBits { word });
            }
        }
        (CommandKind::Steer | CommandKind::Gas, true) => {}
        (_, false) => {
            if word & UNAUTHORIZED_MASK != word {
                return Err(TxViolation::Unauthorized { kind, word });
            }
        }
    }

    Ok(())
}
