use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{Album, Playlist, SimpleTrack, Track, TrackOrigin};

static TITLE_BRACKETS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(.*\)|（.*）|「.*」|『.*』|<.*>|《.*》|〈.*〉|＜.*＞").unwrap()
});

static ARTIST_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*\)|（.*）").unwrap());

static UNSAFE_FILE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[?*<>|":/\\]+"#).unwrap());

pub fn normalize_title(title: &str) -> String {
    TITLE_BRACKETS.replace_all(title, "").trim().to_string()
}

pub fn normalize_artist(artist: &str) -> String {
    // The fullwidth comma is what Kugou expects between multiple artists.
    let joined = artist
        .replace(", ", "、")
        .replace(" & ", "、")
        .replace('.', "")
        .replace('和', "、");
    ARTIST_BRACKETS.replace_all(&joined, "").trim().to_string()
}

pub fn sanitize_file_name(name: &str) -> String {
    UNSAFE_FILE_CHARS.replace_all(name, "").trim().to_string()
}

pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}

pub fn track_file_name(track: &SimpleTrack) -> String {
    format!("{} [{}].mp3", sanitize_file_name(&track.name), track.id)
}

pub fn track_output_dir(root: &Path, origin: &TrackOrigin) -> PathBuf {
    match origin {
        TrackOrigin::Single => root.to_path_buf(),
        TrackOrigin::Album(name) | TrackOrigin::Playlist(name) => {
            root.join(sanitize_file_name(name))
        }
    }
}

pub fn lrc_path_for(mp3_path: &Path) -> PathBuf {
    mp3_path.with_extension("lrc")
}

pub fn simple_track_from_track(track: &Track) -> SimpleTrack {
    SimpleTrack {
        id: track.id.clone(),
        name: track.name.clone(),
        artists: track.artists.iter().map(|a| a.name.clone()).collect(),
        album: track.album.name.clone(),
        release_date: track.album.release_date.clone(),
        cover_url: track.album.images.first().map(|i| i.url.clone()),
        duration_ms: track.duration_ms,
        origin: TrackOrigin::Single,
    }
}

pub fn simple_tracks_from_album(album: &Album) -> Vec<SimpleTrack> {
    let cover_url = album.images.first().map(|i| i.url.clone());

    album
        .tracks
        .items
        .iter()
        .map(|track| SimpleTrack {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artists.iter().map(|a| a.name.clone()).collect(),
            album: album.name.clone(),
            release_date: album.release_date.clone(),
            cover_url: cover_url.clone(),
            duration_ms: track.duration_ms,
            origin: TrackOrigin::Album(album.name.clone()),
        })
        .collect()
}

pub fn simple_tracks_from_playlist(playlist: &Playlist) -> Vec<SimpleTrack> {
    playlist
        .tracks
        .items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .map(|track| {
            let mut simple = simple_track_from_track(track);
            simple.origin = TrackOrigin::Playlist(playlist.name.clone());
            simple
        })
        .collect()
}

pub async fn sleep_between_tracks(seconds: u64) {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    for remaining in (1..=seconds).rev() {
        pb.set_message(format!("Next download in {}s...", remaining));
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
}
