//! Parse command - assemble a payload and show the receipt.

use std::path::PathBuf;

use clap::Args;
use console::style;

use receipt_core::{ReceiptAssembler, ReceiptParser};

use super::{read_payload, write_output};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Payload file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report inconsistencies in the assembled receipt
    #[arg(long)]
    validate: bool,

    /// Ignore dotted keys such as "customer.name"
    #[arg(long)]
    no_dotted_keys: bool,
}

pub fn run(args: ParseArgs) -> anyhow::Result<()> {
    let payload = read_payload(args.input.as_deref())?;

    let receipt = ReceiptAssembler::new()
        .with_dotted_keys(!args.no_dotted_keys)
        .assemble(&payload)?;

    if args.validate {
        let issues = receipt.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = serde_json::to_string_pretty(&receipt)?;
    write_output(&output, args.output.as_deref())
}
