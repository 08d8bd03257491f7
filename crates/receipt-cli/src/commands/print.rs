//! Print command - render a payload on the text preview surface.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use receipt_core::TextPreview;

use super::{load_profile, read_payload, write_output};

/// Arguments for the print command.
#[derive(Args)]
pub struct PrintArgs {
    /// Payload file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print one line per row with columns joined by " | "
    #[arg(long)]
    rows: bool,

    /// Override the profile page width
    #[arg(long)]
    width: Option<f32>,
}

pub fn run(args: PrintArgs, profile_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut profile = load_profile(profile_path)?;
    if let Some(width) = args.width {
        if !width.is_finite() || width <= 0.0 {
            anyhow::bail!("Page width must be positive, got {}", width);
        }
        profile.page_width = width;
    }

    let payload = read_payload(args.input.as_deref())?;
    info!("Printing {} bytes of payload", payload.len());

    let mut preview = TextPreview::new(profile.page_width);
    let job = receipt_core::print(&payload, &profile, &mut preview)?;
    let drawer_opened = preview.cash_drawer_opened();

    let output = if args.rows {
        preview.rows().join("\n")
    } else {
        preview.into_string()
    };
    write_output(&output, args.output.as_deref())?;

    if drawer_opened {
        eprintln!("{} Cash drawer opened", style("ℹ").blue());
    }

    debug!(
        "Printed {} commands in {:?}",
        job.commands().len(),
        start.elapsed()
    );

    Ok(())
}
