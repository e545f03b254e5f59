use std::io::{self, Write};

use crate::{config, error, info, success, warning, ytdlp};

/// Interactive first-run setup: store API credentials, then verify the
/// external tools the pipeline shells out to.
pub async fn setup() {
    info!(
        "Create a Spotify API app at {} and paste its credentials here.",
        config::SPOTIFY_DASHBOARD_URL
    );
    info!("Any redirect URI will do — it is never used.");

    let client_id = prompt("Client ID: ");
    let client_secret = prompt("Client Secret: ");

    if client_id.is_empty() || client_secret.is_empty() {
        error!("Both a client ID and a client secret are required.");
    }

    let path = config::tokens_path();
    if let Some(parent) = path.parent() {
        if let Err(e) = async_fs::create_dir_all(parent).await {
            error!("Failed to create config directory: {}", e);
        }
    }

    if let Err(e) = async_fs::write(&path, format!("{}:{}", client_id, client_secret)).await {
        error!("Failed to save credentials: {}", e);
    }
    success!("Credentials saved to {}.", path.display());

    match ytdlp::download::tool_version("yt-dlp", "--version").await {
        Some(version) => success!("Found yt-dlp {}.", version),
        None => warning!(
            "yt-dlp was not found on PATH. Install it from https://github.com/yt-dlp/yt-dlp."
        ),
    }

    match ytdlp::download::tool_version("ffmpeg", "-version").await {
        Some(version) => success!("Found ffmpeg {}.", version),
        None => {
            warning!("ffmpeg was not found on PATH. Install it from https://ffmpeg.org/download.html.")
        }
    }
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        error!("Failed to read input.");
    }
    line.trim().to_string()
}
