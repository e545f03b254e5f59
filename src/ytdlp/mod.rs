//! # yt-dlp Integration Module
//!
//! Locates downloadable media for a track on YouTube Music and extracts it
//! to MP3, both by shelling out to the external `yt-dlp` binary (which in
//! turn drives `ffmpeg` for the audio conversion). Nothing here talks to
//! YouTube directly — yt-dlp owns extraction quirks, signature handling and
//! format selection, and this module owns query construction, result
//! ranking and subprocess plumbing.
//!
//! Matching strategy: search the YouTube Music Songs shelf for
//! `<normalized title> - <normalized artists>`, then rank candidates by
//! distance to the track's authoritative duration. With a search limit of 1
//! the ranking step is pointless, so the search page itself is handed to
//! the extractor capped at one result, saving a subprocess round-trip.

pub mod download;
pub mod search;

use std::path::Path;

use async_trait::async_trait;

use crate::{
    info,
    pipeline::MediaProvider,
    types::{MediaRef, SimpleTrack},
};

/// Media locator/extractor backed by the `yt-dlp` binary.
pub struct YtDlp {
    search_limit: u32,
    verbose: bool,
}

impl YtDlp {
    pub fn new(search_limit: u32, verbose: bool) -> Self {
        Self {
            search_limit: search_limit.max(1),
            verbose,
        }
    }
}

#[async_trait]
impl MediaProvider for YtDlp {
    async fn locate(&self, track: &SimpleTrack) -> Result<MediaRef, String> {
        let query = search::search_query(track);

        if self.search_limit == 1 {
            // One result needs no ranking; the extractor resolves the
            // search page itself.
            if self.verbose {
                info!("Using the first search result for \"{}\"", query);
            }
            let url = search::search_url(&query)?;
            return Ok(MediaRef::SearchFirst { url });
        }

        let entries = search::search_songs(track, self.search_limit).await?;
        let entry = search::closest_entry(entries, track.duration_ms)
            .ok_or_else(|| format!("No results found for \"{}\"", query))?;

        if self.verbose {
            let length = entry
                .duration
                .map(|d| format!("{:.0}s", d))
                .unwrap_or_else(|| "unknown length".to_string());
            info!("Matched \"{}\" ({})", entry.title, length);
        }

        let url = entry
            .original_url
            .or(entry.webpage_url)
            .ok_or_else(|| "Search result is missing a URL".to_string())?;
        Ok(MediaRef::Video { url })
    }

    async fn extract(&self, media: &MediaRef, output_path: &Path) -> Result<(), String> {
        download::download_audio(media, output_path).await
    }
}
