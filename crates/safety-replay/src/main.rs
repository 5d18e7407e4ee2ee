//! safety-replay: feed a CAN trace through the Honda safety hooks.
//!
//! Decisions are logged to stderr; a JSON summary is printed to stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use honda_safety::{HardwareVariant, MetricsObserver, SafetyConfig, TracingObserver};
use safety_replay::{parse_trace, Replayer};
use safety_telemetry::{init_logging, TelemetryConfig};

/// Replay a CAN trace through the Honda safety hooks
#[derive(Parser, Debug)]
#[command(name = "safety-replay")]
#[command(about = "Replay a CAN trace through the Honda safety hooks")]
struct Args {
    /// Trace file, one `<rx|tx|fwd> <bus> <id> [data]` record per line
    trace: PathBuf,

    /// TOML file with a `[safety]` section
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hardware variant, overrides the config file and SAFETY_VARIANT
    #[arg(long, value_parser = parse_variant)]
    variant: Option<HardwareVariant>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,

    /// Log every decision, not just rejections
    #[arg(short, long)]
    verbose: bool,
}

fn parse_variant(value: &str) -> Result<HardwareVariant, String> {
    value
        .parse::<HardwareVariant>()
        .map_err(|e| e.to_string())
}

/// CLI flag, then config file, then environment.
fn resolve_config(args: &Args) -> Result<SafetyConfig> {
    let mut config = match &args.config {
        Some(path) => SafetyConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SafetyConfig::from_env().context("Invalid SAFETY_VARIANT")?,
    };
    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::from_env().with_verbose(args.verbose);
    telemetry.json_logs |= args.json;
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let config = resolve_config(&args)?;

    let text = fs::read_to_string(&args.trace)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;
    let records = parse_trace(&text)
        .with_context(|| format!("Failed to parse trace {}", args.trace.display()))?;

    info!(
        trace = %args.trace.display(),
        records = records.len(),
        variant = %config.variant,
        "Replaying trace"
    );

    let mut replayer = Replayer::from_config(&config, (TracingObserver, MetricsObserver));
    replayer.run(&records);

    let summary = replayer.summary();
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to encode summary")?
    );

    Ok(())
}
