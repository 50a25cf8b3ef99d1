pub mod builder;

use std::{fs::remove_dir_all, path::PathBuf};

use anyhow::Context;
use itertools::Itertools;
use recap_store::ObjectStore;

use crate::{
    llm::client::CompletionClient,
    llm::transcriber::Transcriber,
    media::AudioFetcher,
    notify::Notifier,
    summarizer::{MapReduceSummarizer, SummaryResult},
    types::JobId,
};

/// Orchestrates one summarization job end to end: fetch audio,
/// transcribe, map-reduce summarize, persist, deliver. Each job owns
/// its own state; a single processor serves many concurrent jobs.
pub struct JobProcessor<F, T, C, N, O>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    C: CompletionClient + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    O: ObjectStore + Send + Sync + 'static,
{
    workdir: PathBuf,
    fetcher: F,
    transcriber: T,
    summarizer: MapReduceSummarizer<C>,
    notifier: N,
    store: O,
}

impl<F, T, C, N, O> JobProcessor<F, T, C, N, O>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    C: CompletionClient + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    O: ObjectStore + Send + Sync + 'static,
{
    /// Runs the job and notifies the chat about progress and outcome.
    /// On failure the user receives a job-identified failure message and
    /// the error is returned to the caller.
    #[tracing::instrument(skip(self), fields(job = %job))]
    pub async fn process(&self, chat_id: i64, url: &str, job: &JobId) -> anyhow::Result<()> {
        match self.run_job(chat_id, url, job).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notify(chat_id, &format!("Job {job} failed: {e:#}")).await;
                Err(e)
            }
        }
    }

    async fn run_job(&self, chat_id: i64, url: &str, job: &JobId) -> anyhow::Result<()> {
        let audio_dl_path = self.workdir.join("audio");

        self.notify(chat_id, &format!("[{job}] Fetching audio...")).await;
        let audio_path = self
            .fetcher
            .fetch(url, job, &audio_dl_path)
            .await
            .context("Failed to fetch audio")?;

        self.notify(chat_id, &format!("[{job}] Transcribing...")).await;
        let transcript = self
            .transcriber
            .transcribe(&audio_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to transcribe audio: {e:?}"))?;

        self.store
            .store_text(&format!("transcripts/{job}.txt"), &transcript)
            .await
            .context("Failed to persist transcript")?;

        self.notify(chat_id, &format!("[{job}] Summarizing...")).await;
        let summary = self.summarizer.summarize(&transcript, job).await?;

        let summary_json = summary
            .to_persisted_json()
            .context("Failed to serialize summary")?;
        self.store
            .store_text(&format!("summaries/{job}.json"), &summary_json)
            .await
            .context("Failed to persist summary")?;

        self.notify(chat_id, &format_summary_message(&summary)).await;

        Ok(())
    }

    /// Delivery failures are logged but never abort the job; the chat
    /// message is best-effort.
    pub async fn notify(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.notifier.send_message(chat_id, text).await {
            tracing::warn!(error = ?e, chat_id, "Failed to deliver chat message");
        }
    }
}

/// Formats the final chat payload from a summary result.
pub fn format_summary_message(summary: &SummaryResult) -> String {
    let highlights = summary
        .highlights
        .iter()
        .map(|h| format!("- {h}"))
        .join("\n");

    format!(
        "Summary (short):\n{}\n\nHighlights:\n{}",
        summary.short, highlights
    )
}

impl<F, T, C, N, O> Drop for JobProcessor<F, T, C, N, O>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    C: CompletionClient + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    O: ObjectStore + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let audio_path = self.workdir.join("audio");

        if audio_path.exists() {
            if let Err(e) = remove_dir_all(&audio_path) {
                tracing::warn!(error = ?e, path = ?audio_path, "Failed to clean up audio directory");
            } else {
                tracing::info!(path = ?audio_path, "Cleaned up audio directory");
            }
        }
    }
}
