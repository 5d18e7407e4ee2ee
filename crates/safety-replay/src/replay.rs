//! Drives trace records through the safety hooks.

use honda_safety::{HardwareVariant, HondaSafety, SafetyConfig, SafetyHooks, SafetyObserver};
use serde::Serialize;
use shared_types::BusIndex;
use tracing::{debug, info};

use crate::trace::{Direction, TraceRecord};

/// Totals after a replay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub variant: String,
    pub rx_frames: u64,
    pub tx_allowed: u64,
    pub tx_rejected: u64,
    pub forwarded: u64,
    pub dropped: u64,
    pub controls_allowed: bool,
}

/// Outcome of one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Received,
    Allowed,
    Rejected,
    Forwarded(BusIndex),
    Dropped,
}

/// Replays records against one set of hooks, keeping counts.
pub struct Replayer<O: SafetyObserver> {
    safety: HondaSafety<O>,
    summary: ReplaySummary,
}

impl<O: SafetyObserver> Replayer<O> {
    pub fn new(variant: HardwareVariant, observer: O) -> Self {
        Self::from_config(&SafetyConfig::new(variant), observer)
    }

    pub fn from_config(config: &SafetyConfig, observer: O) -> Self {
        Self {
            safety: HondaSafety::from_config(config, observer),
            summary: ReplaySummary {
                variant: config.variant.to_string(),
                ..ReplaySummary::default()
            },
        }
    }

    pub fn safety(&self) -> &HondaSafety<O> {
        &self.safety
    }

    /// Feed one record to the matching hook.
    pub fn step(&mut self, record: &TraceRecord) -> Decision {
        let frame = &record.frame;
        match record.direction {
            Direction::Rx => {
                self.safety.on_rx(frame);
                self.summary.rx_frames += 1;
                Decision::Received
            }
            Direction::Tx => {
                if self.safety.on_tx(frame) {
                    self.summary.tx_allowed += 1;
                    debug!(line = record.line, id = frame.id(), "tx allowed");
                    Decision::Allowed
                } else {
                    self.summary.tx_rejected += 1;
                    info!(line = record.line, id = frame.id(), "tx rejected");
                    Decision::Rejected
                }
            }
            Direction::Forward => match self.safety.on_forward(frame.bus(), frame) {
                Some(dest) => {
                    self.summary.forwarded += 1;
                    debug!(line = record.line, id = frame.id(), to = %dest, "forwarded");
                    Decision::Forwarded(dest)
                }
                None => {
                    self.summary.dropped += 1;
                    debug!(line = record.line, id = frame.id(), "dropped");
                    Decision::Dropped
                }
            },
        }
    }

    /// Feed all records in order.
    pub fn run<'a>(&mut self, records: impl IntoIterator<Item = &'a TraceRecord>) {
        for record in records {
            self.step(record);
        }
    }

    pub fn summary(&self) -> ReplaySummary {
        ReplaySummary {
            controls_allowed: self.safety.controls_allowed(),
            ..self.summary.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_trace;
    use honda_safety::NoopObserver;

    fn replay(variant: HardwareVariant, text: &str) -> (Vec<Decision>, ReplaySummary) {
        let records = parse_trace(text).unwrap();
        let mut replayer = Replayer::new(variant, NoopObserver);
        let decisions = records.iter().map(|r| replayer.step(r)).collect();
        (decisions, replayer.summary())
    }

    #[test]
    fn test_engage_then_brake() {
        let text = "\
            rx 0 1a6 80000000\n\
            tx 0 e4 00100000\n\
            rx 0 17c 0000000000002000\n\
            tx 0 e4 00100000\n";
        let (decisions, summary) = replay(HardwareVariant::Standalone, text);

        assert_eq!(
            decisions,
            vec![Decision::Received, Decision::Allowed, Decision::Received, Decision::Rejected]
        );
        assert_eq!(summary.rx_frames, 2);
        assert_eq!(summary.tx_allowed, 1);
        assert_eq!(summary.tx_rejected, 1);
        assert!(!summary.controls_allowed);
    }

    #[test]
    fn test_gateway_forwarding_counts() {
        let text = "fwd 1 100 00\nfwd 2 e4 00\nfwd 0 100 00\nfwd 2 100 00\n";
        let (decisions, summary) = replay(HardwareVariant::Gateway, text);

        assert_eq!(decisions[0], Decision::Forwarded(BusIndex(2)));
        assert_eq!(decisions[1], Decision::Dropped);
        assert_eq!(decisions[2], Decision::Dropped);
        assert_eq!(decisions[3], Decision::Forwarded(BusIndex(1)));
        assert_eq!(summary.forwarded, 2);
        assert_eq!(summary.dropped, 2);
        assert_eq!(summary.variant, "gateway");
    }

    #[test]
    fn test_from_config_selects_variant() {
        let config = SafetyConfig::parse("[safety]\nvariant = \"bosch\"\n").unwrap();
        let replayer = Replayer::from_config(&config, NoopObserver);
        assert_eq!(replayer.safety().variant(), HardwareVariant::Gateway);
        assert_eq!(replayer.summary().variant, "gateway");
    }

    #[test]
    fn test_summary_serializes() {
        let (_, summary) = replay(HardwareVariant::Standalone, "rx 0 296 60\n");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["rx_frames"], 1);
        assert_eq!(json["controls_allowed"], true);
        assert_eq!(json["variant"], "standalone");
    }
}
