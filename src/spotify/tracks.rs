use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config,
    management::{CacheCategory, CacheManager},
    types::{Album, Playlist, Track},
    warning,
};

/// Retrieves a single track record, preferring the local cache.
///
/// Looks the track up in the `track` cache category first; on a miss it
/// fetches `/tracks/{id}` from the Spotify Web API and stores the response
/// verbatim for future runs. Cache writes are advisory — a failed store is
/// ignored and the fetched record is still returned.
///
/// # Arguments
///
/// * `track_id` - Spotify ID of the track
/// * `token` - Valid access token for Spotify API authentication
/// * `cache` - Disk cache consulted before any network traffic
///
/// # Returns
///
/// Returns `Ok(Track)` with the full track record (including the embedded
/// album with cover images), or `Err(String)` on network or API failure.
///
/// # Rate Limiting
///
/// Delegates to the shared fetch loop: 429 responses wait out the
/// `Retry-After` interval and retry, 502 responses retry after a fixed
/// delay, all other non-success statuses are errors.
pub async fn get_track(track_id: &str, token: &str, cache: &CacheManager) -> Result<Track, String> {
    if let Some(track) = cache.retrieve::<Track>(CacheCategory::Track, track_id).await {
        return Ok(track);
    }

    let api_url = format!(
        "{url}/tracks/{id}",
        url = config::SPOTIFY_API_URL,
        id = track_id
    );
    let track: Track = fetch_api(&api_url, token).await?;

    let _ = cache.store(CacheCategory::Track, track_id, &track).await;
    Ok(track)
}

/// Retrieves a full album record (with its track listing), cache-first.
///
/// Same caching and retry behavior as [`get_track`], against the `album`
/// cache category and the `/albums/{id}` endpoint.
pub async fn get_album(album_id: &str, token: &str, cache: &CacheManager) -> Result<Album, String> {
    if let Some(album) = cache.retrieve::<Album>(CacheCategory::Album, album_id).await {
        return Ok(album);
    }

    let api_url = format!(
        "{url}/albums/{id}",
        url = config::SPOTIFY_API_URL,
        id = album_id
    );
    let album: Album = fetch_api(&api_url, token).await?;

    let _ = cache.store(CacheCategory::Album, album_id, &album).await;
    Ok(album)
}

/// Retrieves a full playlist record (with item tracks), cache-first.
///
/// Same caching and retry behavior as [`get_track`], against the `playlist`
/// cache category and the `/playlists/{id}` endpoint. Playlist items whose
/// track record is absent (removed or local files) survive deserialization
/// as empty items and are filtered later by the track resolver.
pub async fn get_playlist(
    playlist_id: &str,
    token: &str,
    cache: &CacheManager,
) -> Result<Playlist, String> {
    if let Some(playlist) = cache
        .retrieve::<Playlist>(CacheCategory::Playlist, playlist_id)
        .await
    {
        return Ok(playlist);
    }

    let api_url = format!(
        "{url}/playlists/{id}",
        url = config::SPOTIFY_API_URL,
        id = playlist_id
    );
    let playlist: Playlist = fetch_api(&api_url, token).await?;

    let _ = cache
        .store(CacheCategory::Playlist, playlist_id, &playlist)
        .await;
    Ok(playlist)
}

/// Shared GET-with-retry loop for the Spotify Web API.
///
/// Handles the two transient conditions the API is known for:
/// - 429 Too Many Requests: waits out the `Retry-After` header (warned to
///   the user) and retries; absurd delays (> 120 s) become an error.
/// - 502 Bad Gateway: retries after a fixed 10 second delay.
///
/// Everything else goes through `error_for_status` and JSON deserialization
/// into the caller's response type.
async fn fetch_api<T: DeserializeOwned>(api_url: &str, token: &str) -> Result<T, String> {
    loop {
        let client = Client::new();
        let response = client
            .get(api_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0);

            if retry_after <= 120 {
                warning!("Rate limited. Retrying in {} seconds...", retry_after);
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            return Err(format!(
                "Rate limited for {} seconds. Try again later.",
                retry_after
            ));
        }

        if response.status() == StatusCode::BAD_GATEWAY {
            sleep(Duration::from_secs(10)).await;
            continue; // retry
        }

        let response = response.error_for_status().map_err(|e| e.to_string())?;
        return response.json::<T>().await.map_err(|e| e.to_string());
    }
}
