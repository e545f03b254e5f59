use chrono::Utc;
use reqwest::Client;

use crate::{config, types::ClientCredentials};

/// Requests an application access token via the client-credentials grant.
///
/// Exchanges the configured client ID and secret for a short-lived access
/// token against the Spotify accounts service. The client-credentials flow
/// requires no user interaction and grants access to public catalog data
/// (tracks, albums, playlists), which is all this tool reads.
///
/// # Arguments
///
/// * `client_id` - Spotify application client ID
/// * `client_secret` - Spotify application client secret
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(ClientCredentials)` - Token stamped with its absolute expiry time
/// - `Err(String)` - Network failure, non-success status, or malformed body
///
/// # Expiry Stamping
///
/// Spotify reports the token lifetime as a relative `expires_in` value. The
/// returned record additionally carries `expire_time`, the absolute Unix
/// timestamp `now + expires_in`, so later expiry checks are a pure
/// comparison against the clock instead of a bookkeeping exercise.
///
/// # Error Conditions
///
/// Common failure scenarios:
/// - Invalid or revoked client credentials (401 from the accounts service)
/// - Network connectivity issues
/// - Spotify accounts service errors
///
/// # Example
///
/// ```
/// let credentials = request_client_credentials("abc123", "shh...").await?;
/// println!("Token valid until {}", credentials.expire_time);
/// ```
pub async fn request_client_credentials(
    client_id: &str,
    client_secret: &str,
) -> Result<ClientCredentials, String> {
    let client = Client::new();
    let response = client
        .post(config::SPOTIFY_TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!(
            "Token request failed with status {}. Check your credentials and run spdl setup again.",
            response.status()
        ));
    }

    let mut credentials: ClientCredentials =
        response.json().await.map_err(|e| e.to_string())?;
    credentials.expire_time = Utc::now().timestamp() as u64 + credentials.expires_in;

    Ok(credentials)
}
