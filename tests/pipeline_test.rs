use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use id3::{Tag, TagLike};
use spdl::management::CacheManager;
use spdl::pipeline::{LyricsProvider, MediaProvider, Pipeline, PipelineOptions};
use spdl::tagger::Tagger;
use spdl::types::{MediaRef, SimpleTrack, TrackOrigin};

// Media double that locates instantly and "extracts" by writing a stub file
#[derive(Clone)]
struct FakeMedia {
    fail_for: Option<String>,
    extracts: Arc<AtomicUsize>,
}

impl FakeMedia {
    fn new(fail_for: Option<&str>) -> (Self, Arc<AtomicUsize>) {
        let extracts = Arc::new(AtomicUsize::new(0));
        let media = FakeMedia {
            fail_for: fail_for.map(|id| id.to_string()),
            extracts: extracts.clone(),
        };
        (media, extracts)
    }
}

#[async_trait]
impl MediaProvider for FakeMedia {
    async fn locate(&self, track: &SimpleTrack) -> Result<MediaRef, String> {
        if self.fail_for.as_deref() == Some(track.id.as_str()) {
            return Err("no match found".to_string());
        }
        Ok(MediaRef::Video {
            url: format!("https://music.youtube.com/watch?v={}", track.id),
        })
    }

    async fn extract(&self, _media: &MediaRef, output_path: &Path) -> Result<(), String> {
        self.extracts.fetch_add(1, Ordering::SeqCst);
        async_fs::write(output_path, b"stub audio")
            .await
            .map_err(|e| e.to_string())
    }
}

// Lyrics double with a fixed answer
#[derive(Clone)]
struct FakeLyrics {
    text: Option<String>,
}

#[async_trait]
impl LyricsProvider for FakeLyrics {
    async fn lyrics(&self, _track: &SimpleTrack) -> Result<String, String> {
        self.text.clone().ok_or_else(|| "nothing found".to_string())
    }
}

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, origin: TrackOrigin) -> SimpleTrack {
    SimpleTrack {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec!["Test Artist".to_string()],
        album: "Test Album".to_string(),
        release_date: "2023-10-01".to_string(),
        cover_url: None,
        duration_ms: 213_000,
        origin,
    }
}

// Helper function to wire a pipeline over a temp output root
fn create_pipeline(
    dir: &tempfile::TempDir,
    media: FakeMedia,
    lyrics: FakeLyrics,
    write_lrc: bool,
) -> Pipeline<FakeMedia, FakeLyrics> {
    let options = PipelineOptions {
        output_root: dir.path().to_path_buf(),
        sleep_secs: 0,
        write_lrc,
        verbose: false,
    };
    let tagger = Tagger::with_cache(CacheManager::with_root(dir.path().join("cache")));
    Pipeline::new(media, lyrics, tagger, options)
}

#[tokio::test]
async fn test_pipeline_downloads_and_tags() {
    let dir = tempfile::tempdir().unwrap();
    let (media, extracts) = FakeMedia::new(None);
    let lyrics = FakeLyrics {
        text: Some("[00:05.00]Lights will guide you home".to_string()),
    };
    let pipeline = create_pipeline(&dir, media, lyrics, false);

    let tracks = vec![
        create_test_track("t1", "Song One", TrackOrigin::Single),
        create_test_track("t2", "Song Two", TrackOrigin::Single),
    ];
    let report = pipeline.run(&tracks).await;

    assert_eq!(report.downloaded, 2);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);
    assert_eq!(extracts.load(Ordering::SeqCst), 2);

    // Finished files are in place, no partial files left behind
    let final_path = dir.path().join("Song One [t1].mp3");
    assert!(final_path.is_file());
    assert!(dir.path().join("Song Two [t2].mp3").is_file());
    assert!(!dir.path().join("Song One [t1].part.mp3").exists());

    // Tags were written before the rename
    let tag = Tag::read_from_path(&final_path).unwrap();
    assert_eq!(tag.title(), Some("Song One"));
    assert_eq!(
        tag.lyrics().next().unwrap().text,
        "[00:05.00]Lights will guide you home"
    );
}

#[tokio::test]
async fn test_pipeline_skips_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let (media, extracts) = FakeMedia::new(None);
    let pipeline = create_pipeline(&dir, media, FakeLyrics { text: None }, false);

    // A file at the final path means a finished earlier run
    std::fs::write(dir.path().join("Song One [t1].mp3"), b"already here").unwrap();

    let tracks = vec![create_test_track("t1", "Song One", TrackOrigin::Single)];
    let report = pipeline.run(&tracks).await;

    assert_eq!(report.downloaded, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);

    // Nothing was re-extracted or overwritten
    assert_eq!(extracts.load(Ordering::SeqCst), 0);
    let content = std::fs::read(dir.path().join("Song One [t1].mp3")).unwrap();
    assert_eq!(content, b"already here");
}

#[tokio::test]
async fn test_pipeline_counts_failures_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let (media, extracts) = FakeMedia::new(Some("t2"));
    let lyrics = FakeLyrics {
        text: Some("[00:05.00]line".to_string()),
    };
    let pipeline = create_pipeline(&dir, media, lyrics, false);

    let tracks = vec![
        create_test_track("t1", "Song One", TrackOrigin::Single),
        create_test_track("t2", "Song Two", TrackOrigin::Single),
        create_test_track("t3", "Song Three", TrackOrigin::Single),
    ];
    let report = pipeline.run(&tracks).await;

    // The failing track is counted but does not stop the rest of the batch
    assert_eq!(report.downloaded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(extracts.load(Ordering::SeqCst), 2);

    assert!(dir.path().join("Song One [t1].mp3").is_file());
    assert!(!dir.path().join("Song Two [t2].mp3").exists());
    assert!(dir.path().join("Song Three [t3].mp3").is_file());
}

#[tokio::test]
async fn test_pipeline_writes_lrc_files() {
    let dir = tempfile::tempdir().unwrap();
    let (media, _) = FakeMedia::new(None);
    let lyrics = FakeLyrics {
        text: Some("[00:05.00]Lights will guide you home".to_string()),
    };
    let pipeline = create_pipeline(&dir, media, lyrics, true);

    let tracks = vec![create_test_track("t1", "Song One", TrackOrigin::Single)];
    pipeline.run(&tracks).await;

    // The sidecar lands next to the finished file, same stem
    let lrc = std::fs::read_to_string(dir.path().join("Song One [t1].lrc")).unwrap();
    assert_eq!(lrc, "[00:05.00]Lights will guide you home");
}

#[tokio::test]
async fn test_pipeline_missing_lyrics_degrade_gracefully() {
    let dir = tempfile::tempdir().unwrap();
    let (media, _) = FakeMedia::new(None);
    let pipeline = create_pipeline(&dir, media, FakeLyrics { text: None }, true);

    let tracks = vec![create_test_track("t1", "Song One", TrackOrigin::Single)];
    let report = pipeline.run(&tracks).await;

    // The track still downloads, just without lyrics anywhere
    assert_eq!(report.downloaded, 1);
    let final_path = dir.path().join("Song One [t1].mp3");
    assert!(final_path.is_file());
    assert!(!dir.path().join("Song One [t1].lrc").exists());

    let tag = Tag::read_from_path(&final_path).unwrap();
    assert_eq!(tag.lyrics().count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_pause_is_positional() {
    let dir = tempfile::tempdir().unwrap();
    let (media, _) = FakeMedia::new(None);
    let options = PipelineOptions {
        output_root: dir.path().to_path_buf(),
        sleep_secs: 7,
        write_lrc: false,
        verbose: false,
    };
    let tagger = Tagger::with_cache(CacheManager::with_root(dir.path().join("cache")));
    let pipeline = Pipeline::new(media, FakeLyrics { text: None }, tagger, options);

    // The middle track already exists and will be skipped
    std::fs::write(dir.path().join("Song Two [t2].mp3"), b"done").unwrap();

    let tracks = vec![
        create_test_track("t1", "Song One", TrackOrigin::Single),
        create_test_track("t2", "Song Two", TrackOrigin::Single),
        create_test_track("t3", "Song Three", TrackOrigin::Single),
    ];

    let start = tokio::time::Instant::now();
    let report = pipeline.run(&tracks).await;
    let elapsed = start.elapsed();

    assert_eq!(report.downloaded, 2);
    assert_eq!(report.skipped, 1);

    // Two pauses: after track 1 and after the skipped track 2, none after
    // the last track
    assert!(elapsed >= std::time::Duration::from_secs(14));
    assert!(elapsed < std::time::Duration::from_secs(21));
}

#[tokio::test]
async fn test_pipeline_album_tracks_get_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    let (media, _) = FakeMedia::new(None);
    let lyrics = FakeLyrics { text: None };
    let pipeline = create_pipeline(&dir, media, lyrics, false);

    let tracks = vec![create_test_track(
        "t1",
        "Shiver",
        TrackOrigin::Album("Parachutes".to_string()),
    )];
    let report = pipeline.run(&tracks).await;

    assert_eq!(report.downloaded, 1);
    assert!(
        dir.path()
            .join("Parachutes")
            .join("Shiver [t1].mp3")
            .is_file()
    );
}
