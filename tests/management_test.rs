use spdl::management::{CacheCategory, CacheManager, is_expired};
use spdl::types::{ClientCredentials, Track};

// Helper function to create a cache manager rooted in a fresh temp dir
fn create_test_cache() -> (tempfile::TempDir, CacheManager) {
    let dir = tempfile::tempdir().unwrap();
    let cache = CacheManager::with_root(dir.path().to_path_buf());
    (dir, cache)
}

// Helper function to create test credentials
fn create_test_credentials() -> ClientCredentials {
    ClientCredentials {
        access_token: "BQDtest".to_string(),
        token_type: "Bearer".to_string(),
        expires_in: 3600,
        expire_time: 1_700_003_600,
    }
}

#[test]
fn test_is_expired() {
    // Strictly before the deadline the token is still valid
    assert!(!is_expired(100, 99));

    // At and after the deadline it is expired
    assert!(is_expired(100, 100));
    assert!(is_expired(100, 101));
}

#[test]
fn test_client_credentials_expire_time_defaults_to_zero() {
    // The Spotify token response has no expire_time field; it must
    // deserialize as zero so a fresh response always reads as expired
    // until stamped
    let json = r#"{"access_token":"BQDtest","token_type":"Bearer","expires_in":3600}"#;
    let credentials: ClientCredentials = serde_json::from_str(json).unwrap();

    assert_eq!(credentials.expire_time, 0);
    assert_eq!(credentials.expires_in, 3600);
}

#[tokio::test]
async fn test_cache_store_and_retrieve() {
    let (dir, cache) = create_test_cache();
    let credentials = create_test_credentials();

    cache
        .store(CacheCategory::Token, "client123", &credentials)
        .await
        .unwrap();

    // Entries land under <root>/<category>/<key>.<ext>
    assert!(dir.path().join("token").join("client123.json").is_file());

    let loaded: ClientCredentials = cache
        .retrieve(CacheCategory::Token, "client123")
        .await
        .unwrap();
    assert_eq!(loaded.access_token, "BQDtest");
    assert_eq!(loaded.token_type, "Bearer");
    assert_eq!(loaded.expires_in, 3600);
    assert_eq!(loaded.expire_time, 1_700_003_600);
}

#[tokio::test]
async fn test_cache_text_and_bytes() {
    let (dir, cache) = create_test_cache();

    cache
        .store_text(CacheCategory::Lyrics, "track1", "[00:01.00]Hello")
        .await
        .unwrap();
    cache
        .store_bytes(CacheCategory::Image, "cover1", &[0xFF, 0xD8, 0xFF, 0xE0])
        .await
        .unwrap();

    // Lyrics are plain text, images are jpg
    assert!(dir.path().join("lyrics").join("track1.txt").is_file());
    assert!(dir.path().join("image").join("cover1.jpg").is_file());

    let text = cache
        .retrieve_text(CacheCategory::Lyrics, "track1")
        .await
        .unwrap();
    assert_eq!(text, "[00:01.00]Hello");

    let bytes = cache
        .retrieve_bytes(CacheCategory::Image, "cover1")
        .await
        .unwrap();
    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn test_cache_miss_returns_none() {
    let (_dir, cache) = create_test_cache();

    let missing: Option<ClientCredentials> = cache.retrieve(CacheCategory::Token, "nope").await;
    assert!(missing.is_none());
    assert!(
        cache
            .retrieve_text(CacheCategory::Lyrics, "nope")
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_cache_corrupt_entry_reads_as_miss() {
    let (_dir, cache) = create_test_cache();

    // A truncated or garbage entry must behave exactly like a miss
    cache
        .store_text(CacheCategory::Track, "broken", "{ not json")
        .await
        .unwrap();

    let loaded: Option<Track> = cache.retrieve(CacheCategory::Track, "broken").await;
    assert!(loaded.is_none());
}

#[tokio::test]
async fn test_cache_clear_category() {
    let (dir, cache) = create_test_cache();
    let credentials = create_test_credentials();

    cache
        .store(CacheCategory::Token, "client123", &credentials)
        .await
        .unwrap();
    cache
        .store_text(CacheCategory::Lyrics, "track1", "[00:01.00]Hello")
        .await
        .unwrap();

    cache.clear(CacheCategory::Token).await.unwrap();

    // Only the cleared category is gone
    assert!(!dir.path().join("token").exists());
    assert!(dir.path().join("lyrics").join("track1.txt").is_file());
}

#[tokio::test]
async fn test_cache_clear_all() {
    let (dir, cache) = create_test_cache();
    let credentials = create_test_credentials();

    cache
        .store(CacheCategory::Token, "client123", &credentials)
        .await
        .unwrap();
    cache
        .store_bytes(CacheCategory::Image, "cover1", &[1, 2, 3])
        .await
        .unwrap();

    cache.clear_all().await.unwrap();
    assert!(!dir.path().exists());
}

#[tokio::test]
async fn test_cache_clear_missing_is_ok() {
    let (_dir, cache) = create_test_cache();

    // Clearing something that was never written is not an error
    cache.clear(CacheCategory::Playlist).await.unwrap();

    let gone = CacheManager::with_root(std::path::PathBuf::from(
        "/definitely/not/a/real/cache/root",
    ));
    gone.clear_all().await.unwrap();
}
