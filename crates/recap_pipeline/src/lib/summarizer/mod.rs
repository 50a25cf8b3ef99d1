//! Map-reduce summarization over an arbitrarily long transcript.
//!
//! The transcript is split into bounded chunks, each chunk is summarized
//! independently (map stage), and the chunk summaries are combined into
//! one structured multi-granularity summary (reduce stage). Map calls
//! run with bounded concurrency but their results are reassembled in
//! chunk order, so completion order never leaks into the reduce input.

mod parse;

use std::time::Duration;

use futures::StreamExt;
use serde::Serialize;

pub use parse::{parse_summary, ParsedSummary};

use crate::{
    chunk::{self, Chunk},
    llm::client::{CompletionClient, LlmError},
    prompt,
    types::JobId,
};

#[derive(Debug, Clone)]
pub struct SummarizeConfig {
    /// Character window used to split the transcript.
    pub max_chunk_chars: usize,
    /// Upper bound on in-flight map calls, to respect provider rate
    /// limits.
    pub map_concurrency: usize,
    pub map_max_tokens: u32,
    pub reduce_max_tokens: u32,
    /// Per-call provider timeout. There is no pipeline-wide deadline.
    pub request_timeout: Duration,
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: 3000,
            map_concurrency: 4,
            map_max_tokens: 300,
            reduce_max_tokens: 800,
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("map stage failed on chunk {chunk_index}: {source}")]
    MapStageFailed {
        chunk_index: usize,
        #[source]
        source: LlmError,
    },
    #[error("reduce stage failed: {source}")]
    ReduceStageFailed {
        #[source]
        source: LlmError,
    },
}

/// The final structured summary of one job.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub short: String,
    pub long: String,
    pub highlights: Vec<String>,
    /// Unparsed reduce output, kept verbatim for traceability.
    pub raw: String,
    pub job_id: JobId,
}

impl SummaryResult {
    /// Renders the persisted `summaries/{job_id}.json` payload.
    pub fn to_persisted_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct Persisted<'a> {
            raw: &'a str,
            job_id: &'a JobId,
        }

        serde_json::to_string(&Persisted {
            raw: &self.raw,
            job_id: &self.job_id,
        })
    }
}

pub struct MapReduceSummarizer<C> {
    client: C,
    config: SummarizeConfig,
}

impl<C> MapReduceSummarizer<C>
where
    C: CompletionClient + Send + Sync,
{
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: SummarizeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SummarizeConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the full map-reduce pass. Either fully succeeds or fails
    /// with a stage-tagged error; no partial result is ever returned.
    #[tracing::instrument(skip(self, transcript), fields(job = %job))]
    pub async fn summarize(
        &self,
        transcript: &str,
        job: &JobId,
    ) -> Result<SummaryResult, SummarizeError> {
        let chunks = chunk::split_chunks(transcript, self.config.max_chunk_chars)?;
        tracing::info!(chunk_count = chunks.len(), "Split transcript into chunks");

        // An empty transcript yields zero chunks; the reduce stage still
        // runs once over the empty summary sequence.
        let chunk_summaries = self.run_map_stage(&chunks).await?;

        let reduce_prompt = prompt::build_reduce_prompt(&chunk_summaries);
        let raw = self
            .client
            .complete(
                &reduce_prompt,
                self.config.reduce_max_tokens,
                self.config.request_timeout,
            )
            .await
            .map_err(|source| SummarizeError::ReduceStageFailed { source })
            .inspect_err(|e| tracing::error!(error = %e, "Reduce stage failed"))?;

        let parsed = parse::parse_summary(&raw);

        Ok(SummaryResult {
            short: parsed.short,
            long: parsed.long,
            highlights: parsed.highlights,
            raw,
            job_id: job.clone(),
        })
    }

    /// Summarizes every chunk, at most `map_concurrency` calls in
    /// flight. The first failure aborts the stage and discards all
    /// partial results.
    async fn run_map_stage(&self, chunks: &[Chunk]) -> Result<Vec<String>, SummarizeError> {
        let concurrency = self.config.map_concurrency.max(1);

        // Collected into a Vec (futures stay lazy) to work around
        // rust-lang/rust#102211: feeding the closure's async blocks
        // straight into `buffer_unordered` makes the spawned task's
        // future fail `Send` with "not general enough" errors.
        let map_futures: Vec<_> = chunks
            .iter()
            .map(|chunk| {
                let map_prompt = prompt::build_map_prompt(&chunk.text);
                let chunk_index = chunk.index;
                async move {
                    let result = self
                        .client
                        .complete(
                            &map_prompt,
                            self.config.map_max_tokens,
                            self.config.request_timeout,
                        )
                        .await;
                    (chunk_index, result)
                }
            })
            .collect();
        let mut map_calls = futures::stream::iter(map_futures).buffer_unordered(concurrency);

        let mut collected = Vec::with_capacity(chunks.len());
        while let Some((chunk_index, result)) = map_calls.next().await {
            match result {
                Ok(summary) => collected.push((chunk_index, summary)),
                Err(source) => {
                    tracing::error!(chunk_index, error = %source, "Map stage failed");
                    return Err(SummarizeError::MapStageFailed {
                        chunk_index,
                        source,
                    });
                }
            }
        }

        // reassemble in chunk order; completion order is arbitrary
        collected.sort_unstable_by_key(|(chunk_index, _)| *chunk_index);
        Ok(collected.into_iter().map(|(_, summary)| summary).collect())
    }
}
