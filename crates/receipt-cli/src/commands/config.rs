//! Config command - manage the store profile.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use receipt_core::{ProfileKey, ProfileUpdate, StoreProfile};

use super::profile_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the current store profile
    Show,

    /// Initialize a new profile file
    Init(InitArgs),

    /// Get a specific profile value
    Get {
        /// Profile key (e.g., "StoreName")
        key: String,
    },

    /// Set a profile value
    Set {
        /// Profile key
        key: String,
        /// New value
        value: String,
    },

    /// Update several profile values at once
    Update(UpdateArgs),

    /// Show profile file path
    Path,
}

/// Settings left out keep their current value.
#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    store_name: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Logo image path (empty to remove the logo)
    #[arg(long)]
    logo_path: Option<String>,

    #[arg(long)]
    printer_name: Option<String>,

    /// Currency symbol
    #[arg(long)]
    currency: Option<String>,

    /// Page width in layout units
    #[arg(long)]
    page_width: Option<f32>,

    #[arg(long)]
    enable_cash_drawer: Option<bool>,
}

impl From<UpdateArgs> for ProfileUpdate {
    fn from(args: UpdateArgs) -> Self {
        Self {
            name: args.store_name,
            address: args.address,
            phone: args.phone,
            email: args.email,
            logo_path: args.logo_path,
            printer_name: args.printer_name,
            currency: args.currency,
            page_width: args.page_width,
            enable_cash_drawer: args.enable_cash_drawer,
        }
    }
}

#[derive(Args)]
struct InitArgs {
    /// Output path for the profile file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, profile: Option<&Path>) -> anyhow::Result<()> {
    let path = profile_path(profile);

    match args.command {
        ConfigCommand::Show => show_profile(&path),
        ConfigCommand::Init(init_args) => init_profile(init_args, &path),
        ConfigCommand::Get { key } => get_value(&path, &key),
        ConfigCommand::Set { key, value } => set_value(&path, &key, &value),
        ConfigCommand::Update(update_args) => update_profile(&path, update_args.into()),
        ConfigCommand::Path => show_path(&path),
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<StoreProfile> {
    if path.exists() {
        Ok(StoreProfile::load(path)?)
    } else {
        Ok(StoreProfile::default())
    }
}

fn show_profile(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        println!(
            "{} No profile file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let profile = load_or_default(path)?;

    for key in ProfileKey::ALL {
        println!("{}={}", style(key).cyan(), profile.get_key(key));
    }

    Ok(())
}

fn init_profile(args: InitArgs, default_path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| default_path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Profile file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    StoreProfile::starter().save(&output_path)?;

    println!(
        "{} Created profile file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn get_value(path: &Path, key: &str) -> anyhow::Result<()> {
    let profile = load_or_default(path)?;
    println!("{}", profile.get(key)?);
    Ok(())
}

/// Load the profile for editing, preparing its directory when the file
/// does not exist yet.
fn load_for_edit(path: &Path) -> anyhow::Result<StoreProfile> {
    if path.exists() {
        return Ok(StoreProfile::load(path)?);
    }
    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(StoreProfile::default())
}

fn set_value(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut profile = load_for_edit(path)?;

    profile.set(key, value)?;
    profile.save(path)?;

    println!("{} Set {} = {}", style("✓").green(), key, value.trim());

    Ok(())
}

fn update_profile(path: &Path, update: ProfileUpdate) -> anyhow::Result<()> {
    if update == ProfileUpdate::default() {
        anyhow::bail!("Nothing to update. Pass at least one setting, e.g. --store-name.");
    }

    let mut profile = load_for_edit(path)?;
    profile.apply(update)?;
    profile.save(path)?;

    println!("{} Updated profile at {}", style("✓").green(), path.display());

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Profile file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'receipt config init' to create a profile file.");
    }

    Ok(())
}
