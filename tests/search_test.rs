use spdl::types::{SimpleTrack, TrackOrigin, YtSearchEntry};
use spdl::ytdlp::search::{closest_entry, search_query, search_url};

// Helper function to create a search entry with a given duration
fn create_entry(id: &str, duration: Option<f64>) -> YtSearchEntry {
    YtSearchEntry {
        id: id.to_string(),
        title: format!("Result {}", id),
        duration,
        original_url: Some(format!("https://music.youtube.com/watch?v={}", id)),
        webpage_url: None,
    }
}

// Helper function to create a track to search for
fn create_test_track(name: &str, artists: &[&str]) -> SimpleTrack {
    SimpleTrack {
        id: "t1".to_string(),
        name: name.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        album: "Test Album".to_string(),
        release_date: "2023-10-01".to_string(),
        cover_url: None,
        duration_ms: 213_000,
        origin: TrackOrigin::Single,
    }
}

#[test]
fn test_search_query() {
    // Title comes first, both sides normalized
    let track = create_test_track("Dynamite (Acoustic)", &["BTS", "Jung Kook"]);
    assert_eq!(search_query(&track), "Dynamite - BTS、Jung Kook");

    // Plain names pass through with the separator
    let track = create_test_track("Fix You", &["Coldplay"]);
    assert_eq!(search_query(&track), "Fix You - Coldplay");
}

#[test]
fn test_search_url() {
    // The query is encoded and the Songs shelf is pinned via the fragment
    assert_eq!(
        search_url("hello").unwrap(),
        "https://music.youtube.com/search?q=hello#Songs"
    );
    assert_eq!(
        search_url("fix you").unwrap(),
        "https://music.youtube.com/search?q=fix+you#Songs"
    );
}

#[test]
fn test_closest_entry_picks_nearest_duration() {
    let entries = vec![
        create_entry("a", Some(180.0)),
        create_entry("b", Some(213.5)),
        create_entry("c", Some(240.0)),
    ];

    // 213.5s is closest to the 213s target
    let best = closest_entry(entries, 213_000).unwrap();
    assert_eq!(best.id, "b");
}

#[test]
fn test_closest_entry_missing_duration_ranks_last() {
    let entries = vec![
        create_entry("a", None),
        create_entry("b", Some(500.0)),
    ];

    // Even a far-off duration beats an unknown one
    let best = closest_entry(entries, 213_000).unwrap();
    assert_eq!(best.id, "b");
}

#[test]
fn test_closest_entry_tie_keeps_platform_order() {
    let entries = vec![
        create_entry("first", Some(198.0)),
        create_entry("second", Some(202.0)),
    ];

    // Both are 2s off; the stable sort keeps the earlier result
    let best = closest_entry(entries, 200_000).unwrap();
    assert_eq!(best.id, "first");
}

#[test]
fn test_closest_entry_empty() {
    assert!(closest_entry(vec![], 213_000).is_none());
}
