use reqwest::Url;
use tokio::process::Command;

use crate::{
    config,
    types::{SimpleTrack, YtSearchEntry, YtSearchResult},
    utils,
};

/// Builds the search query for a track: normalized title, then normalized
/// artists. YouTube Music matches title-first queries far more reliably
/// than artist-first ones.
pub fn search_query(track: &SimpleTrack) -> String {
    format!(
        "{} - {}",
        utils::normalize_title(&track.name),
        utils::normalize_artist(&utils::join_artists(&track.artists))
    )
}

/// Builds the YouTube Music search page URL for a query, pinned to the
/// Songs shelf.
pub fn search_url(query: &str) -> Result<String, String> {
    let mut url = Url::parse_with_params(config::YTM_SEARCH_URL, &[("q", query)])
        .map_err(|e| e.to_string())?;
    url.set_fragment(Some("Songs"));
    Ok(url.to_string())
}

/// Runs a yt-dlp metadata-only search and returns the entries it found.
///
/// `--dump-single-json --skip-download` turns the search page into one JSON
/// document on stdout; `--playlist-end` caps how many results yt-dlp
/// resolves, which is what makes larger limits affordable.
pub async fn search_songs(track: &SimpleTrack, limit: u32) -> Result<Vec<YtSearchEntry>, String> {
    let query = search_query(track);
    let url = search_url(&query)?;

    let output = Command::new("yt-dlp")
        .arg(&url)
        .args([
            "--dump-single-json",
            "--skip-download",
            "--playlist-end",
            &limit.to_string(),
        ])
        .output()
        .await
        .map_err(|e| e.to_string())?;

    if !output.status.success() {
        return Err(format!(
            "yt-dlp search failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    let result: YtSearchResult =
        serde_json::from_slice(&output.stdout).map_err(|e| e.to_string())?;
    Ok(result.entries)
}

/// Picks the entry whose duration is closest to the track's authoritative
/// duration. The sort is stable, so ties keep the platform's result order;
/// entries without a reported duration rank last.
pub fn closest_entry(mut entries: Vec<YtSearchEntry>, duration_ms: u64) -> Option<YtSearchEntry> {
    let target = duration_ms as f64 / 1000.0;
    entries.sort_by(|a, b| distance(a, target).total_cmp(&distance(b, target)));
    entries.into_iter().next()
}

fn distance(entry: &YtSearchEntry, target: f64) -> f64 {
    entry
        .duration
        .map(|d| (d - target).abs())
        .unwrap_or(f64::MAX)
}
