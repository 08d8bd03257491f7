//! CLI application for laying out and previewing point-of-sale receipts.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{config, layout, parse, print};

/// Receipt printer - lay out and preview point-of-sale receipts
#[derive(Parser)]
#[command(name = "receipt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the store profile file
    #[arg(short, long, global = true)]
    profile: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a receipt payload to a text preview
    Print(print::PrintArgs),

    /// Assemble a payload and show the receipt as JSON
    Parse(parse::ParseArgs),

    /// Show the draw commands for a payload as JSON
    Layout(layout::LayoutArgs),

    /// Manage the store profile
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // RUST_LOG directives override the -v level, e.g. RUST_LOG=receipt_core=debug
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let profile = cli.profile.as_deref();
    match cli.command {
        Commands::Print(args) => print::run(args, profile),
        Commands::Parse(args) => parse::run(args),
        Commands::Layout(args) => layout::run(args, profile),
        Commands::Config(args) => config::run(args, profile),
    }
}
