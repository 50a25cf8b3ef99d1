pub mod ytdlp;

use std::{
    future::Future,
    path::{Path, PathBuf},
};

use crate::types::JobId;

/// Fetches the audio track of a media URL onto local disk.
pub trait AudioFetcher {
    fn fetch(
        &self,
        url: &str,
        job: &JobId,
        audio_dl_path: &Path,
    ) -> impl Future<Output = Result<PathBuf, MediaError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("`{0}` not found on PATH")]
    ToolNotFound(&'static str),
    #[error("audio download failed: {0}")]
    Download(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
