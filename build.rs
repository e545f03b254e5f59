//! Build script for the Spotify downloader CLI.
//!
//! Handles setup tasks that need to occur during compilation, primarily
//! copying the configuration template into the user's config directory.
//! This ensures a ready-to-edit `.env.example` sits next to where the
//! application actually looks for its `.env` file after installation.

use std::{env, fs, path::PathBuf};

/// Main build script entry point that installs the configuration template.
///
/// Executes during the cargo build process to copy `.env.example` from the
/// crate root into the platform config directory the application reads at
/// startup. Users can then copy the template to `.env` in place and fill in
/// their Spotify credentials.
///
/// # File Operations
///
/// ## Source Location
/// The script looks for `.env.example` in the crate root directory (where
/// Cargo.toml resides).
///
/// ## Destination Location
/// The template is copied to the platform-specific config directory:
/// - Linux: `~/.config/spdl/.env.example`
/// - macOS: `~/Library/Application Support/spdl/.env.example`
/// - Windows: `%APPDATA%/spdl/.env.example`
///
/// # Error Handling Strategy
///
/// - **Missing template**: issues a cargo warning but continues the build
/// - **Directory creation failures**: returns errors (critical)
/// - **File copy failures**: returns errors (critical)
///
/// # Environment Variables Used
///
/// - `CARGO_MANIFEST_DIR` - Path to the crate root directory (provided by cargo)
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Re-run if the template changes
    println!("cargo:rerun-if-changed=.env.example");

    // Where to copy FROM (crate root)
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    // Compute the target dir (the user's config dir) and ensure it exists
    let mut out_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spdl");
    fs::create_dir_all(&out_dir)?;

    // Only copy if the source exists; otherwise warn instead of failing
    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
