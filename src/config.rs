//! Configuration management for the Spotify track downloader.
//!
//! This module handles loading and accessing configuration values from
//! environment variables, `.env` files and the credentials file written by
//! `spdl setup`. It provides a centralized way to manage application
//! configuration including Spotify API credentials, service endpoints and
//! tunable matching parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the user config directory
//! 3. The `.tokens` file written by `spdl setup` (credentials only)
//! 4. Application defaults (tunables only)

use std::{env, path::PathBuf};

/// Spotify Web API base URL used by all metadata fetches.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Spotify accounts service endpoint for the client-credentials grant.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify developer dashboard page where API apps are created.
pub const SPOTIFY_DASHBOARD_URL: &str = "https://developer.spotify.com/dashboard/create";

/// Kugou song search endpoint (returns fingerprint hashes with durations).
pub const KUGOU_SONG_SEARCH_URL: &str = "https://mobileservice.kugou.com/api/v3/search/song";

/// Kugou lyrics search endpoint (by fingerprint hash or by keyword).
pub const KUGOU_LYRICS_SEARCH_URL: &str = "https://lyrics.kugou.com/search";

/// Kugou lyrics content download endpoint.
pub const KUGOU_LYRICS_DOWNLOAD_URL: &str = "https://lyrics.kugou.com/download";

/// YouTube Music search page used to locate downloadable media.
pub const YTM_SEARCH_URL: &str = "https://music.youtube.com/search";

/// Loads environment variables from a `.env` file in the user config directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// config directory under `spdl/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values. A missing
/// `.env` file is not an error: credentials can also come from the
/// `.tokens` file written by `spdl setup`.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.config/spdl/.env`
/// - macOS: `~/Library/Application Support/spdl/.env`
/// - Windows: `%APPDATA%/spdl/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded or does
/// not exist, or an error string if directory creation or file parsing fails.
///
/// # Example
///
/// ```
/// use spdl::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = config_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the root directory for all cached data.
///
/// The cache holds fetched Spotify records, cover images, cleaned lyrics and
/// API tokens, each in its own category subdirectory. The directory itself is
/// created lazily by the cache manager on first write.
///
/// # Platform Locations
///
/// - Linux: `~/.cache/spdl`
/// - macOS: `~/Library/Caches/spdl`
/// - Windows: `%LOCALAPPDATA%/spdl`
pub fn cache_dir() -> PathBuf {
    let mut path = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spdl");
    path
}

/// Returns the directory holding user configuration (`.env` and `.tokens`).
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spdl");
    path
}

/// Returns the path of the credentials file written by `spdl setup`.
///
/// The file contains a single `client_id:client_secret` line.
pub fn tokens_path() -> PathBuf {
    config_dir().join(".tokens")
}

/// Resolves the Spotify API client ID and secret.
///
/// Credentials are looked up in two places, in order:
/// 1. The `SPDL_CLIENT_ID` / `SPDL_CLIENT_SECRET` environment variables
///    (usable directly or through the config-directory `.env` file).
/// 2. The `.tokens` file written by `spdl setup`, containing
///    `client_id:client_secret` on one line.
///
/// # Returns
///
/// Returns `Ok((client_id, client_secret))` when both values are available,
/// or an error string with remediation guidance otherwise.
///
/// # Errors
///
/// Fails when neither source provides a full credential pair. The error
/// message points the user at `spdl setup`.
///
/// # Example
///
/// ```
/// let (id, secret) = config::client_credentials().await?;
/// ```
pub async fn client_credentials() -> Result<(String, String), String> {
    if let (Ok(id), Ok(secret)) = (env::var("SPDL_CLIENT_ID"), env::var("SPDL_CLIENT_SECRET")) {
        if !id.is_empty() && !secret.is_empty() {
            return Ok((id, secret));
        }
    }

    let content = async_fs::read_to_string(tokens_path()).await.map_err(|_| {
        "No API credentials found.\nRun spdl setup or set SPDL_CLIENT_ID and SPDL_CLIENT_SECRET."
            .to_string()
    })?;

    match content.trim().split_once(':') {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => {
            Ok((id.to_string(), secret.to_string()))
        }
        _ => Err(
            "Credentials file is malformed (expected client_id:client_secret).\nRun spdl setup."
                .to_string(),
        ),
    }
}

/// Returns the duration tolerance for lyrics matching, in seconds.
///
/// A Kugou song-search record is only used for a hash-based lyrics lookup
/// when its reported duration lies within this many seconds of the track's
/// authoritative duration. Overridable through `SPDL_LYRICS_TOLERANCE`;
/// defaults to 8.
pub fn lyrics_duration_tolerance() -> u64 {
    env::var("SPDL_LYRICS_TOLERANCE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8)
}

/// Returns the Kugou song-search page size.
///
/// Bounds how many fingerprint records the lyrics resolver iterates per
/// track. Overridable through `SPDL_LYRICS_PAGE_SIZE`; defaults to 8.
pub fn lyrics_page_size() -> u32 {
    env::var("SPDL_LYRICS_PAGE_SIZE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8)
}
