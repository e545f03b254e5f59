use id3::{Tag, TagLike, frame::PictureType};
use spdl::management::{CacheCategory, CacheManager};
use spdl::tagger::Tagger;
use spdl::types::{SimpleTrack, TrackOrigin};

// Helper function to create a track worth tagging
fn create_test_track(cover_url: Option<&str>) -> SimpleTrack {
    SimpleTrack {
        id: "t1".to_string(),
        name: "Fix You".to_string(),
        artists: vec!["Coldplay".to_string(), "Jon Hopkins".to_string()],
        album: "X&Y".to_string(),
        release_date: "2005-06-06".to_string(),
        cover_url: cover_url.map(|u| u.to_string()),
        duration_ms: 294_000,
        origin: TrackOrigin::Single,
    }
}

// Helper function to drop a fake audio file into a temp dir
fn create_audio_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("Fix You [t1].mp3");
    std::fs::write(&path, b"not really mpeg frames").unwrap();
    path
}

#[tokio::test]
async fn test_write_tags_text_frames() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_audio_file(&dir);

    let cache = CacheManager::with_root(dir.path().join("cache"));
    let tagger = Tagger::with_cache(cache);
    let track = create_test_track(None);

    tagger
        .write_tags(&path, &track, Some("[00:05.00]Lights will guide you home"))
        .await
        .unwrap();

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Fix You"));
    assert_eq!(tag.artist(), Some("Coldplay, Jon Hopkins"));
    assert_eq!(tag.album(), Some("X&Y"));

    // The release date goes into the raw TDRL frame as-is
    let released = tag.get("TDRL").unwrap().content().text().unwrap();
    assert_eq!(released, "2005-06-06");

    // The lyrics frame is English-tagged with the text unchanged
    let lyrics = tag.lyrics().next().unwrap();
    assert_eq!(lyrics.lang, "eng");
    assert_eq!(lyrics.text, "[00:05.00]Lights will guide you home");

    // No cover URL, no picture frame
    assert_eq!(tag.pictures().count(), 0);
}

#[tokio::test]
async fn test_write_tags_embeds_cached_cover() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_audio_file(&dir);

    // Seed the image cache under the URL's trailing segment so no HTTP
    // request is needed
    let cache = CacheManager::with_root(dir.path().join("cache"));
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    cache
        .store_bytes(CacheCategory::Image, "cover1", &jpeg)
        .await
        .unwrap();

    let tagger = Tagger::with_cache(cache);
    let track = create_test_track(Some("https://i.scdn.co/image/cover1"));

    tagger.write_tags(&path, &track, None).await.unwrap();

    let tag = Tag::read_from_path(&path).unwrap();
    let picture = tag.pictures().next().unwrap();
    assert_eq!(picture.picture_type, PictureType::CoverFront);
    assert_eq!(picture.mime_type, "image/jpg");
    assert_eq!(picture.description, "Cover Image");
    assert_eq!(picture.data, jpeg);
}

#[tokio::test]
async fn test_write_tags_without_lyrics() {
    let dir = tempfile::tempdir().unwrap();
    let path = create_audio_file(&dir);

    let cache = CacheManager::with_root(dir.path().join("cache"));
    let tagger = Tagger::with_cache(cache);
    let track = create_test_track(None);

    tagger.write_tags(&path, &track, None).await.unwrap();

    let tag = Tag::read_from_path(&path).unwrap();
    assert_eq!(tag.title(), Some("Fix You"));
    assert_eq!(tag.lyrics().count(), 0);
}
