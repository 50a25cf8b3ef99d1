mod chunk;
mod llm;
pub mod media;
pub mod notify;
pub mod prompt;
mod processor;
mod summarizer;
pub mod tracing;
pub mod types;
pub mod webhook;

pub use chunk::{split_chunks, Chunk};
pub use llm::openai;
pub use llm::{
    client::{CompletionClient, LlmError},
    transcriber::{TranscribeError, Transcriber},
};
pub use media::AudioFetcher;
pub use notify::Notifier;
pub use processor::{
    builder::JobProcessorBuilder, format_summary_message, JobProcessor,
};
pub use summarizer::{
    parse_summary, MapReduceSummarizer, ParsedSummary, SummarizeConfig, SummarizeError,
    SummaryResult,
};
pub use types::JobId;
