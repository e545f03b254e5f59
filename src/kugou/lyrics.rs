use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;

use crate::{
    config, info,
    management::{CacheCategory, CacheManager},
    pipeline::LyricsProvider,
    types::{
        KugouLyricsCandidate, KugouLyricsResponse, KugouLyricsSearchResponse, KugouSong,
        KugouSongSearchResponse, SimpleTrack,
    },
    utils,
};

static TIMESTAMPED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\d{2}:\d{2}\.\d{2,3}\]").unwrap());

// Credit lines carry a `key: value` pair after the timestamp.
static METADATA_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r".+\].+[:：].+").unwrap());

const MAX_TRIM_WINDOW: usize = 20;

/// Whether a song-search record's duration is close enough to the track's
/// to trust its fingerprint hash. The tolerance is inclusive.
pub fn duration_matches(candidate_secs: u64, target_secs: u64, tolerance: u64) -> bool {
    candidate_secs.abs_diff(target_secs) <= tolerance
}

/// Synced-lyrics resolver backed by the Kugou lyrics API.
///
/// Resolution is a cascade: disk cache, then a fingerprint-hash search gated
/// by track duration, then a plain keyword search as the recall fallback.
/// Whatever is found is cleaned of uploader credit lines and cached under
/// the track ID before being returned.
pub struct Kugou {
    client: Client,
    cache: CacheManager,
    duration_tolerance: u64,
    page_size: u32,
    verbose: bool,
}

impl Kugou {
    pub fn new(verbose: bool) -> Self {
        Self {
            client: Client::new(),
            cache: CacheManager::new(),
            duration_tolerance: config::lyrics_duration_tolerance(),
            page_size: config::lyrics_page_size(),
            verbose,
        }
    }

    /// Resolves cleaned synced lyrics for a track.
    ///
    /// Outcomes are terminal: `Ok` carries the cleaned `.lrc`-style text,
    /// `Err` carries the reason nothing usable was found. A failing search
    /// call is not terminal by itself — the cascade moves on to the next
    /// stage and only reports once every stage has come up dry.
    pub async fn get_lyrics(&self, track: &SimpleTrack) -> Result<String, String> {
        if let Some(lyrics) = self
            .cache
            .retrieve_text(CacheCategory::Lyrics, &track.id)
            .await
        {
            return Ok(lyrics);
        }

        let keyword = format!(
            "{} - {}",
            utils::normalize_artist(&utils::join_artists(&track.artists)),
            utils::normalize_title(&track.name)
        );

        let candidate = match self
            .candidate_by_hash(&keyword, track.duration_ms / 1000)
            .await
        {
            Some(candidate) => candidate,
            None => self
                .candidate_by_keyword(&keyword)
                .await
                .ok_or_else(|| format!("No lyrics candidates for \"{}\"", keyword))?,
        };

        if self.verbose {
            info!(
                "Selected lyrics candidate: {} - {}",
                candidate.singer, candidate.song
            );
        }

        let raw = self.download_lyrics(&candidate).await?;
        let cleaned = clean_lyrics(&raw);

        let _ = self
            .cache
            .store_text(CacheCategory::Lyrics, &track.id, &cleaned)
            .await;
        Ok(cleaned)
    }

    /// Fingerprint stage: song search, duration gate, lyrics-by-hash lookup.
    ///
    /// Records outside the duration tolerance are skipped; an in-tolerance
    /// record whose hash turns up no candidates does not stop the scan.
    async fn candidate_by_hash(
        &self,
        keyword: &str,
        duration_secs: u64,
    ) -> Option<KugouLyricsCandidate> {
        let songs = self.search_songs(keyword).await.ok()?;

        for song in songs {
            if !duration_matches(song.duration, duration_secs, self.duration_tolerance) {
                continue;
            }

            if self.verbose {
                info!(
                    "Trying lyrics hash of {} - {} ({}s)",
                    song.singername, song.songname, song.duration
                );
            }

            if let Ok(candidates) = self.search_lyrics(("hash", &song.hash)).await {
                if let Some(candidate) = candidates.into_iter().next() {
                    return Some(candidate);
                }
            }
        }

        None
    }

    async fn candidate_by_keyword(&self, keyword: &str) -> Option<KugouLyricsCandidate> {
        if self.verbose {
            info!("Falling back to lyrics keyword search for \"{}\"", keyword);
        }

        self.search_lyrics(("keyword", keyword))
            .await
            .ok()?
            .into_iter()
            .next()
    }

    async fn search_songs(&self, keyword: &str) -> Result<Vec<KugouSong>, String> {
        let response = self
            .client
            .get(config::KUGOU_SONG_SEARCH_URL)
            .query(&[
                ("version", "9108"),
                ("plat", "0"),
                ("pagesize", &self.page_size.to_string()),
                ("showtype", "0"),
                ("keyword", keyword),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let parsed: KugouSongSearchResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(parsed.data.info)
    }

    async fn search_lyrics(
        &self,
        query: (&str, &str),
    ) -> Result<Vec<KugouLyricsCandidate>, String> {
        let response = self
            .client
            .get(config::KUGOU_LYRICS_SEARCH_URL)
            .query(&[("ver", "1"), ("man", "yes"), ("client", "pc"), query])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let parsed: KugouLyricsSearchResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(parsed.candidates)
    }

    async fn download_lyrics(&self, candidate: &KugouLyricsCandidate) -> Result<String, String> {
        let response = self
            .client
            .get(config::KUGOU_LYRICS_DOWNLOAD_URL)
            .query(&[
                ("fmt", "lrc"),
                ("charset", "utf8"),
                ("client", "pc"),
                ("ver", "1"),
                ("id", candidate.id.as_str()),
                ("accesskey", candidate.accesskey.as_str()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let parsed: KugouLyricsResponse = response.json().await.map_err(|e| e.to_string())?;
        if parsed.content.is_empty() {
            return Err("Lyrics download returned no content".to_string());
        }

        let bytes = STANDARD
            .decode(parsed.content.trim())
            .map_err(|e| e.to_string())?;
        String::from_utf8(bytes).map_err(|e| e.to_string())
    }
}

#[async_trait]
impl LyricsProvider for Kugou {
    async fn lyrics(&self, track: &SimpleTrack) -> Result<String, String> {
        self.get_lyrics(track).await
    }
}

/// Strips uploader credit lines from raw synced lyrics.
///
/// Keeps only lines with a `[mm:ss.xx]` timestamp prefix, then trims a
/// leading and a trailing credits block. A credits block ends (or starts) at
/// the deepest metadata-looking line within the first or last 20 lines;
/// lyric bodies regularly contain colons mid-song, which is why the scan is
/// windowed instead of global.
pub fn clean_lyrics(raw: &str) -> String {
    let decoded = raw.replace("&apos;", "'");

    let mut lines: Vec<&str> = decoded
        .lines()
        .filter(|line| TIMESTAMPED_LINE.is_match(line))
        .collect();

    let window = MAX_TRIM_WINDOW.min(lines.len().saturating_sub(1));
    if let Some(cut) = (0..window).rev().find(|&i| METADATA_LINE.is_match(lines[i])) {
        lines.drain(..=cut);
    }

    let window = MAX_TRIM_WINDOW.min(lines.len().saturating_sub(1));
    let len = lines.len();
    if let Some(cut) = (len - window..len).find(|&i| METADATA_LINE.is_match(lines[i])) {
        lines.truncate(cut);
    }

    lines.join("\n").trim().to_string()
}
