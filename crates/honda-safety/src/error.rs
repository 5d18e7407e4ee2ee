//! Error types for the Honda safety hooks

use thiserror::Error;

use crate::domain::outbound_guard::CommandKind;

/// Why an outbound frame was suppressed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TxViolation {
    /// Brake command sets bits 0x40/0x80 of byte 0 while authorized.
    #[error("Brake command sets reserved bits: {word:#010x}")]
    BrakeReservedBits { word: u32 },

    /// Actuating command sent without effective authority.
    #[error("Unauthorized {kind} command: {word:#010x}")]
    Unauthorized { kind: CommandKind, word: u32 },
}

impl TxViolation {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxViolation::BrakeReservedBits { .. } => "brake_reserved_bits",
            TxViolation::Unauthorized {
                kind: CommandKind::Brake,
                ..
            } => "unauthorized_brake",
            TxViolation::Unauthorized {
                kind: CommandKind::Steer,
                ..
            } => "unauthorized_steer",
            TxViolation::Unauthorized {
                kind: CommandKind::Gas,
                ..
            } => "unauthorized_gas",
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown hardware variant name
    #[error("Invalid hardware variant: {0:?} (expected standalone|nidec|gateway|bosch)")]
    InvalidVariant(String),

    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
