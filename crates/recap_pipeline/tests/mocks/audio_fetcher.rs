use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use recap_pipeline::{media::MediaError, AudioFetcher, JobId};

#[derive(Clone)]
pub struct MockAudioFetcher {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl Default for MockAudioFetcher {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockAudioFetcher {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl AudioFetcher for MockAudioFetcher {
    async fn fetch(
        &self,
        url: &str,
        job: &JobId,
        audio_dl_path: &Path,
    ) -> Result<PathBuf, MediaError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(MediaError::Download(msg.clone()));
        }
        Ok(audio_dl_path.join(format!("{job}.mp3")))
    }
}
