//! CLI command implementations.

pub mod config;
pub mod layout;
pub mod parse;
pub mod print;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use console::style;
use tracing::debug;

use receipt_core::{FileProfileProvider, ProfileProvider, StoreProfile};

/// Default location of the store profile.
pub fn default_profile_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("receipt")
        .join("store-profile.txt")
}

/// Resolve the profile path from the `--profile` flag.
pub fn profile_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_profile_path)
}

/// Load the store profile for a print request.
///
/// A missing default profile means defaults; a missing explicit one is an
/// error.
pub fn load_profile(explicit: Option<&Path>) -> anyhow::Result<StoreProfile> {
    let path = profile_path(explicit);

    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("Profile file not found: {}", path.display());
        }
        debug!("No profile at {}, using defaults", path.display());
        return Ok(StoreProfile::default());
    }

    Ok(FileProfileProvider::new(path).current_profile())
}

/// Read a payload from `input`, or from stdin when it is absent or `-`.
pub fn read_payload(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            Ok(fs::read_to_string(path)?)
        }
        _ => {
            let mut payload = String::new();
            io::stdin().read_to_string(&mut payload)?;
            Ok(payload)
        }
    }
}

/// Write `output` to a file, or to stdout.
pub fn write_output(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        fs::write(path, output)?;
        println!("{} Output written to {}", style("✓").green(), path.display());
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
