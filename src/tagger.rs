use std::path::Path;

use id3::{
    Frame, Tag, TagLike, Version,
    frame::{Lyrics, Picture, PictureType},
};
use reqwest::Client;
use tabled::Table;

use crate::{
    management::{CacheCategory, CacheManager},
    types::{SimpleTrack, TagTableRow},
    utils, warning,
};

/// Builds and writes the ID3 tag set for a downloaded track.
///
/// The tag set is assembled completely in memory — metadata text frames,
/// the optional front-cover picture and the optional lyrics frame — and
/// written to the file in a single pass. Cover art is fetched over HTTP at
/// most once per distinct image and kept in the disk cache keyed by the
/// URL's trailing path segment.
pub struct Tagger {
    client: Client,
    cache: CacheManager,
}

impl Tagger {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            cache: CacheManager::new(),
        }
    }

    pub fn with_cache(cache: CacheManager) -> Self {
        Self {
            client: Client::new(),
            cache,
        }
    }

    /// Writes the full tag set for `track` into the file at `path`.
    ///
    /// Cover fetch failures degrade to a coverless tag set with a warning;
    /// they never fail the call. The tag summary table is printed before
    /// the write so the user sees what lands in the file.
    pub async fn write_tags(
        &self,
        path: &Path,
        track: &SimpleTrack,
        lyrics: Option<&str>,
    ) -> Result<(), String> {
        let artist = utils::join_artists(&track.artists);

        let mut tag = Tag::new();
        tag.set_title(&track.name);
        tag.set_artist(&artist);
        tag.set_album(&track.album);
        tag.add_frame(Frame::text("TDRL", track.release_date.clone()));

        let mut cover = "none";
        if let Some(url) = &track.cover_url {
            match self.cover_bytes(url).await {
                Ok(bytes) => {
                    tag.add_frame(Picture {
                        mime_type: "image/jpg".to_string(),
                        picture_type: PictureType::CoverFront,
                        description: "Cover Image".to_string(),
                        data: bytes,
                    });
                    cover = "embedded";
                }
                Err(e) => warning!("Could not attach cover image: {}", e),
            }
        }

        if let Some(text) = lyrics {
            tag.add_frame(Lyrics {
                lang: "eng".to_string(),
                description: String::new(),
                text: text.to_string(),
            });
        }

        let rows = vec![
            TagTableRow {
                tag: "Title".to_string(),
                value: track.name.clone(),
            },
            TagTableRow {
                tag: "Artist".to_string(),
                value: artist,
            },
            TagTableRow {
                tag: "Album".to_string(),
                value: track.album.clone(),
            },
            TagTableRow {
                tag: "Released".to_string(),
                value: track.release_date.clone(),
            },
            TagTableRow {
                tag: "Cover".to_string(),
                value: cover.to_string(),
            },
            TagTableRow {
                tag: "Lyrics".to_string(),
                value: if lyrics.is_some() { "eng" } else { "none" }.to_string(),
            },
        ];
        let table = Table::new(rows);
        println!("{}", table);

        tag.write_to_path(path, Version::Id3v24)
            .map_err(|e| e.to_string())
    }

    async fn cover_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let key = url.rsplit('/').next().unwrap_or("cover");

        if let Some(bytes) = self.cache.retrieve_bytes(CacheCategory::Image, key).await {
            return Ok(bytes);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;
        let bytes = response.bytes().await.map_err(|e| e.to_string())?.to_vec();

        let _ = self
            .cache
            .store_bytes(CacheCategory::Image, key, &bytes)
            .await;
        Ok(bytes)
    }
}
