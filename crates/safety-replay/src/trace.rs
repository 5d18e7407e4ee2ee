//! CAN trace text format.
//!
//! One frame per line:
//!
//! ```text
//! # direction  bus  id    data
//! rx           0    1a6   80000000
//! tx           0    0e4   00100000
//! fwd          2    33d   -
//! ```
//!
//! Direction is `rx`, `tx` or `fwd`. Bus is decimal. The id is hex with an
//! optional `0x` prefix. Data is contiguous hex; `-` or a missing field is
//! an empty payload. `#` starts a comment.

use std::fmt;
use std::str::FromStr;

use shared_types::{CanFrame, FrameError};
use thiserror::Error;

/// Which hook a trace line drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Rx,
    Tx,
    Forward,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Rx => "rx",
            Direction::Tx => "tx",
            Direction::Forward => "fwd",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rx" => Ok(Direction::Rx),
            "tx" => Ok(Direction::Tx),
            "fwd" | "forward" => Ok(Direction::Forward),
            other => Err(other.to_string()),
        }
    }
}

/// One parsed trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// 1-based line number in the source text.
    pub line: usize,
    pub direction: Direction,
    pub frame: CanFrame,
}

/// Trace parsing errors. Every variant carries the 1-based line number.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("line {line}: expected `<rx|tx|fwd> <bus> <id> [data]`, got {fields} field(s)")]
    FieldCount { line: usize, fields: usize },

    #[error("line {line}: unknown direction '{value}'")]
    Direction { line: usize, value: String },

    #[error("line {line}: invalid bus '{value}'")]
    Bus { line: usize, value: String },

    #[error("line {line}: invalid id '{value}'")]
    Id { line: usize, value: String },

    #[error("line {line}: invalid data")]
    Data {
        line: usize,
        #[source]
        source: hex::FromHexError,
    },

    #[error("line {line}: {source}")]
    Frame {
        line: usize,
        #[source]
        source: FrameError,
    },
}

impl TraceError {
    pub fn line(&self) -> usize {
        match self {
            TraceError::FieldCount { line, .. }
            | TraceError::Direction { line, .. }
            | TraceError::Bus { line, .. }
            | TraceError::Id { line, .. }
            | TraceError::Data { line, .. }
            | TraceError::Frame { line, .. } => *line,
        }
    }
}

/// Parse a whole trace. Stops at the first bad line.
pub fn parse_trace(text: &str) -> Result<Vec<TraceRecord>, TraceError> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(record) = parse_line(idx + 1, raw)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Parse one line. Blank and comment-only lines yield `None`.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<TraceRecord>, TraceError> {
    let content = match raw.split_once('#') {
        Some((before, _)) => before,
        None => raw,
    };

    let fields: Vec<&str> = content.split_whitespace().collect();
    if fields.is_empty() {
        return Ok(None);
    }
    if !(3..=4).contains(&fields.len()) {
        return Err(TraceError::FieldCount {
            line,
            fields: fields.len(),
        });
    }

    let direction = fields[0].parse().map_err(|value| TraceError::Direction { line, value })?;

    let bus: u8 = fields[1].parse().map_err(|_| TraceError::Bus {
        line,
        value: fields[1].to_string(),
    })?;

    let id_text = fields[2]
        .strip_prefix("0x")
        .or_else(|| fields[2].strip_prefix("0X"))
        .unwrap_or(fields[2]);
    let id = u32::from_str_radix(id_text, 16).map_err(|_| TraceError::Id {
        line,
        value: fields[2].to_string(),
    })?;

    let payload = match fields.get(3) {
        None | Some(&"-") => Vec::new(),
        Some(data) => hex::decode(data).map_err(|source| TraceError::Data { line, source })?,
    };

    let frame =
        CanFrame::new(id, bus, &payload).map_err(|source| TraceError::Frame { line, source })?;

    Ok(Some(TraceRecord {
        line,
        direction,
        frame,
    }))
}
