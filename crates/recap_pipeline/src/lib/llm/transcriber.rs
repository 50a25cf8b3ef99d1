use std::{fmt::Debug, future::Future, path::Path};

use crate::llm::client::LlmError;

/// Turns a local audio file into transcript text.
pub trait Transcriber {
    const TRANSCRIPTION_MODEL: &'static str;

    type Error: Debug;

    fn transcribe(
        &self,
        audio_path: &Path,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("failed to read audio file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Provider(#[from] LlmError),
}
