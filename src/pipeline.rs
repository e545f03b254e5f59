//! Per-track download pipeline and batch driver.
//!
//! A batch is processed strictly sequentially: resolve the output path,
//! skip finished files, locate media, extract audio to a `.part.mp3`
//! sibling, resolve lyrics, tag, then atomically rename into place. Because
//! the rename is last, a file at the final path is always complete — the
//! existence check never has to distinguish a half-finished download from a
//! finished one, and interrupted runs leave only `.part.mp3` debris behind.
//!
//! The media and lyrics sources sit behind trait seams so the driver logic
//! (ordering, skip/failure accounting, inter-track pacing) is testable
//! without subprocesses or network access.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    info, success,
    tagger::Tagger,
    types::{MediaRef, SimpleTrack},
    utils, warning,
};

/// Locates downloadable media for a track and extracts its audio.
#[async_trait]
pub trait MediaProvider {
    async fn locate(&self, track: &SimpleTrack) -> Result<MediaRef, String>;
    async fn extract(&self, media: &MediaRef, output_path: &Path) -> Result<(), String>;
}

/// Resolves cleaned synced lyrics for a track, best-effort.
#[async_trait]
pub trait LyricsProvider {
    async fn lyrics(&self, track: &SimpleTrack) -> Result<String, String>;
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum TrackOutcome {
    Downloaded,
    Skipped,
}

pub struct PipelineOptions {
    pub output_root: PathBuf,
    pub sleep_secs: u64,
    pub write_lrc: bool,
    pub verbose: bool,
}

pub struct Pipeline<M, L> {
    media: M,
    lyrics: L,
    tagger: Tagger,
    options: PipelineOptions,
}

impl<M: MediaProvider, L: LyricsProvider> Pipeline<M, L> {
    pub fn new(media: M, lyrics: L, tagger: Tagger, options: PipelineOptions) -> Self {
        Self {
            media,
            lyrics,
            tagger,
            options,
        }
    }

    /// Processes every track in order and returns the batch tally.
    ///
    /// Per-track failures are logged and counted, never propagated — one
    /// unresolvable track must not sink the rest of an album. The
    /// inter-track pause is positional: it runs after every non-final
    /// track, including skipped and failed ones, so a fixed batch always
    /// produces the same request rhythm toward upstream services.
    pub async fn run(&self, tracks: &[SimpleTrack]) -> BatchReport {
        let total = tracks.len();
        let mut report = BatchReport::default();

        for (index, track) in tracks.iter().enumerate() {
            info!(
                "[{}/{}] {} - {}",
                index + 1,
                total,
                utils::join_artists(&track.artists),
                track.name
            );

            match self.process(track).await {
                Ok(TrackOutcome::Downloaded) => report.downloaded += 1,
                Ok(TrackOutcome::Skipped) => report.skipped += 1,
                Err(reason) => {
                    warning!("Skipping track: {}", reason);
                    report.failed += 1;
                }
            }

            if index + 1 < total {
                utils::sleep_between_tracks(self.options.sleep_secs).await;
            }
        }

        report
    }

    async fn process(&self, track: &SimpleTrack) -> Result<TrackOutcome, String> {
        let dir = utils::track_output_dir(&self.options.output_root, &track.origin);
        let final_path = dir.join(utils::track_file_name(track));

        if final_path.is_file() {
            info!("Already downloaded, skipping.");
            return Ok(TrackOutcome::Skipped);
        }

        let media = self.media.locate(track).await?;

        async_fs::create_dir_all(&dir).await.map_err(|e| e.to_string())?;
        let part_path = final_path.with_extension("part.mp3");
        self.media.extract(&media, &part_path).await?;

        let lyrics = match self.lyrics.lyrics(track).await {
            Ok(text) => Some(text),
            Err(reason) => {
                warning!("No lyrics found: {}", reason);
                None
            }
        };

        if let Err(e) = self
            .tagger
            .write_tags(&part_path, track, lyrics.as_deref())
            .await
        {
            warning!("Tagging failed: {}", e);
        }

        if self.options.write_lrc {
            if let Some(text) = &lyrics {
                let lrc_path = utils::lrc_path_for(&final_path);
                if let Err(e) = async_fs::write(&lrc_path, text).await {
                    warning!("Failed to write lyrics file: {}", e);
                } else if self.options.verbose {
                    info!("Wrote lyrics to {}", lrc_path.display());
                }
            }
        }

        async_fs::rename(&part_path, &final_path)
            .await
            .map_err(|e| e.to_string())?;
        success!("Downloaded {}", final_path.display());

        Ok(TrackOutcome::Downloaded)
    }
}
