//! Layout command - show the draw commands for a payload.

use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Args;

use receipt_core::extract::parse_timestamp;
use receipt_core::{MonospaceMetrics, PrintJob};

use super::{load_profile, read_payload, write_output};

/// Arguments for the layout command.
#[derive(Args)]
pub struct LayoutArgs {
    /// Payload file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Footer timestamp, e.g. "2024-03-01 12:00:00" (default: now)
    #[arg(long)]
    at: Option<String>,
}

pub fn run(args: LayoutArgs, profile_path: Option<&Path>) -> anyhow::Result<()> {
    let profile = load_profile(profile_path)?;
    let payload = read_payload(args.input.as_deref())?;

    let printed_at = match args.at.as_deref() {
        Some(raw) => parse_timestamp(raw)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp: {}", raw))?,
        None => Local::now().naive_local(),
    };

    let job = PrintJob::prepare(&payload, &profile, MonospaceMetrics::new(), printed_at)?;
    let output = serde_json::to_string_pretty(job.commands())?;
    write_output(&output, args.output.as_deref())
}
