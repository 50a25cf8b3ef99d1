use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use tokio::process::Command;

use crate::{
    media::{AudioFetcher, MediaError},
    types::JobId,
};

/// Audio fetcher backed by the `yt-dlp` CLI.
#[derive(Debug, Clone, Default)]
pub struct YtDlpFetcher {
    cookies_path: Option<PathBuf>,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookies(mut self, cookies_path: impl Into<PathBuf>) -> Self {
        self.cookies_path = Some(cookies_path.into());
        self
    }
}

impl AudioFetcher for YtDlpFetcher {
    async fn fetch(
        &self,
        url: &str,
        job: &JobId,
        audio_dl_path: &Path,
    ) -> Result<PathBuf, MediaError> {
        tokio::fs::create_dir_all(audio_dl_path).await?;

        let audio_mp3_path = audio_dl_path.join(format!("{job}.mp3"));

        // download audio if needed
        if audio_mp3_path.exists() {
            tracing::debug!("Audio already exists at {}", audio_mp3_path.display());
            return Ok(audio_mp3_path);
        }

        let output_template = audio_dl_path.join(format!("{job}.%(ext)s"));

        let mut cmd = Command::new("yt-dlp");
        cmd.arg("--extract-audio")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg("--output")
            .arg(&output_template)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        if let Some(cookies) = &self.cookies_path {
            cmd.arg("--cookies").arg(cookies);
        }

        let output = match cmd.arg(url).output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MediaError::ToolNotFound("yt-dlp"));
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(error = %stderr, "Failed to download audio");
            return Err(MediaError::Download(format!("yt-dlp failed: {stderr}")));
        }

        if !audio_mp3_path.exists() {
            return Err(MediaError::Download(format!(
                "yt-dlp did not produce expected file: {}",
                audio_mp3_path.display()
            )));
        }

        Ok(audio_mp3_path)
    }
}
