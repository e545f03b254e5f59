use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;

use crate::{
    config, error, info,
    kugou::Kugou,
    management::{CacheManager, CredentialsManager},
    pipeline::{Pipeline, PipelineOptions},
    spotify, success,
    tagger::Tagger,
    types::SimpleTrack,
    utils,
    ytdlp::{self, YtDlp},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Track,
    Album,
    Playlist,
}

/// Validates a Spotify share URL and extracts the reference kind and ID.
///
/// Accepted URLs look like `https://open.spotify.com/<kind>/<id>` with a
/// kind of `track`, `album` or `playlist`; query strings (`?si=...`) are
/// ignored. Anything else is rejected with a message naming what was wrong.
pub fn parse_spotify_url(input: &str) -> Result<(ResourceKind, String), String> {
    let url = Url::parse(input).map_err(|_| format!("Not a valid URL: {}", input))?;

    if url.host_str() != Some("open.spotify.com") {
        return Err(format!("Not a Spotify URL: {}", input));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() != 2 || segments[1].is_empty() {
        return Err(format!("Unsupported Spotify URL: {}", input));
    }

    let kind = match segments[0] {
        "track" => ResourceKind::Track,
        "album" => ResourceKind::Album,
        "playlist" => ResourceKind::Playlist,
        other => {
            return Err(format!(
                "Unsupported Spotify reference \"{}\" (expected track, album or playlist)",
                other
            ));
        }
    };

    Ok((kind, segments[1].to_string()))
}

pub async fn download(
    url: &str,
    output: Option<PathBuf>,
    search_limit: u32,
    sleep_time: u64,
    write_lrc: bool,
    verbose: bool,
) {
    let (kind, id) = match parse_spotify_url(url) {
        Ok(parsed) => parsed,
        Err(e) => error!("{}", e),
    };

    if let Err(e) = ytdlp::download::check_tools().await {
        error!("{}", e);
    }

    let (client_id, client_secret) = match config::client_credentials().await {
        Ok(credentials) => credentials,
        Err(e) => error!("{}", e),
    };

    let mut credentials = CredentialsManager::new(client_id, client_secret);
    let token = match credentials.get_valid_token().await {
        Ok(token) => token,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };

    let cache = CacheManager::new();

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching metadata...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let tracks = match fetch_tracks(kind, &id, &token, &cache).await {
        Ok(tracks) => {
            pb.finish_and_clear();
            tracks
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };

    if tracks.is_empty() {
        error!("No tracks found for {}", url);
    }

    info!("Found {} track(s).", tracks.len());

    let options = PipelineOptions {
        output_root: output.unwrap_or_else(|| PathBuf::from(".")),
        sleep_secs: sleep_time,
        write_lrc,
        verbose,
    };
    let pipeline = Pipeline::new(
        YtDlp::new(search_limit, verbose),
        Kugou::new(verbose),
        Tagger::new(),
        options,
    );

    let report = pipeline.run(&tracks).await;

    success!(
        "Done: {} downloaded, {} skipped, {} failed.",
        report.downloaded,
        report.skipped,
        report.failed
    );
}

async fn fetch_tracks(
    kind: ResourceKind,
    id: &str,
    token: &str,
    cache: &CacheManager,
) -> Result<Vec<SimpleTrack>, String> {
    match kind {
        ResourceKind::Track => {
            let track = spotify::tracks::get_track(id, token, cache).await?;
            Ok(vec![utils::simple_track_from_track(&track)])
        }
        ResourceKind::Album => {
            let album = spotify::tracks::get_album(id, token, cache).await?;
            Ok(utils::simple_tracks_from_album(&album))
        }
        ResourceKind::Playlist => {
            let playlist = spotify::tracks::get_playlist(id, token, cache).await?;
            Ok(utils::simple_tracks_from_playlist(&playlist))
        }
    }
}
