use std::{future::Future, time::Duration};

/// One-shot text-completion capability against a remote provider.
///
/// Implementations issue exactly one outbound request per call and never
/// retry; retry policy, if any, belongs to the caller.
pub trait CompletionClient {
    fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Connection or transport failure before a response was obtained.
    #[error("provider unreachable: {0}")]
    Unavailable(String),
    /// The per-call timeout elapsed.
    #[error("provider call timed out")]
    Timeout,
    /// The provider returned a non-success status (rate limit, invalid
    /// auth, content policy, ...).
    #[error("provider rejected request: {status} - {message}")]
    Rejected { status: u16, message: String },
    /// The response body could not be decoded into the expected text
    /// content.
    #[error("provider response malformed: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else if e.is_decode() {
            LlmError::MalformedResponse(e.to_string())
        } else {
            LlmError::Unavailable(e.to_string())
        }
    }
}
