//! # CLI Module
//!
//! This module provides the command-line interface layer for Spdl. It
//! implements the user-facing commands and coordinates between the Spotify
//! metadata client, the download pipeline, and the local cache.
//!
//! ## Overview
//!
//! The default invocation takes a Spotify share URL and drives the whole
//! download pipeline for it; the subcommands cover first-run setup and
//! cache maintenance:
//!
//! - **Downloading**: [`download`] validates the URL, resolves the
//!   referenced tracks, and runs the per-track pipeline over the batch
//! - **Setup**: [`setup`] stores API credentials and verifies that the
//!   external tools (`yt-dlp`, `ffmpeg`) are installed
//! - **Cache Maintenance**: [`clear_cache`] removes cached data per
//!   category or wholesale
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Pipeline Layer (Per-Track Orchestration)
//!     ↓
//! Provider Layer (Spotify, yt-dlp, Kugou)
//!     ↓
//! Cache / Network / Subprocess
//! ```
//!
//! Each command handles user interaction, progress feedback and error
//! presentation itself; fatal conditions (bad URL, missing tools, missing
//! credentials) terminate with a clear message before any track is touched,
//! while per-track problems are logged and skipped so one broken track
//! never sinks a batch.
//!
//! ## Error Handling Philosophy
//!
//! - **Fail fast before work starts**: pre-flight checks catch missing
//!   tools and credentials up front
//! - **Degrade during work**: a track without lyrics or cover art is still
//!   downloaded and tagged with what is available
//! - **Helpful messages**: errors name the remediation (`spdl setup`,
//!   install links) instead of just the failure

mod cache;
mod download;
mod setup;

pub use cache::clear_cache;
pub use download::ResourceKind;
pub use download::download;
pub use download::parse_spotify_url;
pub use setup::setup;
