use std::{path::Path, process::Stdio};

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
};

use crate::types::MediaRef;

static PROGRESS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[download\] *(.*) of *~? *([^ ]*) at *([^ ]*) *ETA *([^ ]*)").unwrap());

static VERSION_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d+").unwrap());

/// Runs `<program> <version_arg>` and extracts a version number from its
/// output. `None` means the tool is missing, not runnable, or prints
/// nothing version-shaped.
pub async fn tool_version(program: &str, version_arg: &str) -> Option<String> {
    let output = Command::new(program).arg(version_arg).output().await.ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    VERSION_NUMBER.find(&stdout).map(|m| m.as_str().to_string())
}

/// Verifies that both external tools the pipeline shells out to are on
/// PATH. Called once before any track is processed; a missing tool fails
/// the whole invocation up front instead of after the first download.
pub async fn check_tools() -> Result<(), String> {
    if tool_version("yt-dlp", "--version").await.is_none() {
        return Err(
            "yt-dlp was not found on PATH. Install it from https://github.com/yt-dlp/yt-dlp."
                .to_string(),
        );
    }

    if tool_version("ffmpeg", "-version").await.is_none() {
        return Err(
            "ffmpeg was not found on PATH. Install it from https://ffmpeg.org/download.html."
                .to_string(),
        );
    }

    Ok(())
}

/// Extracts audio for a located media reference into `output_path` as MP3.
///
/// The output template replaces the final extension with yt-dlp's `%(ext)s`
/// placeholder so post-processing lands exactly on `output_path`. Progress
/// lines from yt-dlp's stdout feed a percentage bar; stderr is collected
/// separately and reported when the subprocess exits non-zero.
pub async fn download_audio(media: &MediaRef, output_path: &Path) -> Result<(), String> {
    let template = output_path.with_extension("%(ext)s");

    let mut command = Command::new("yt-dlp");
    match media {
        MediaRef::Video { url } => {
            command.arg(url).arg("--no-playlist");
        }
        MediaRef::SearchFirst { url } => {
            command.arg(url).args(["--playlist-end", "1"]);
        }
    }

    command
        .args([
            "--extract-audio",
            "--format",
            "ba/best",
            "--audio-format",
            "mp3",
            "--sponsorblock-remove",
            "all",
            "--newline",
            "--output",
        ])
        .arg(&template)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(|e| e.to_string())?;

    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| "Failed to capture yt-dlp stderr".to_string())?;
    let stderr_task = tokio::spawn(async move {
        let mut collected = String::new();
        let mut lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            collected.push_str(&line);
            collected.push('\n');
        }
        collected
    });

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| "Failed to capture yt-dlp stdout".to_string())?;
    let mut lines = BufReader::new(stdout).lines();

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.blue} {pos:>3}% {msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
        if let Some(caps) = PROGRESS_LINE.captures(&line) {
            if let Ok(percent) = caps[1].trim().trim_end_matches('%').parse::<f64>() {
                pb.set_position(percent.clamp(0.0, 100.0) as u64);
            }
            pb.set_message(format!(
                "of {} at {} ETA {}",
                caps[2].trim(),
                caps[3].trim(),
                caps[4].trim()
            ));
        }
    }

    let status = child.wait().await.map_err(|e| e.to_string())?;
    pb.finish_and_clear();

    if !status.success() {
        let stderr_output = stderr_task.await.unwrap_or_default();
        return Err(format!(
            "yt-dlp exited with {}: {}",
            status,
            stderr_output.trim()
        ));
    }

    Ok(())
}
