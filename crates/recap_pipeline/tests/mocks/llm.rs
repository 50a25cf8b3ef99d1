use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use recap_pipeline::{CompletionClient, LlmError};

#[derive(Clone, Copy)]
pub enum MockFailure {
    Timeout,
    Rejected,
    Unavailable,
}

impl MockFailure {
    fn to_error(self) -> LlmError {
        match self {
            MockFailure::Timeout => LlmError::Timeout,
            MockFailure::Rejected => LlmError::Rejected {
                status: 429,
                message: "rate limited".into(),
            },
            MockFailure::Unavailable => LlmError::Unavailable("connection refused".into()),
        }
    }
}

#[derive(Clone)]
enum Reply {
    /// Respond with the prompt itself, so tests can trace content flow.
    Echo,
    Fixed(String),
}

/// Scriptable completion client. Prompts are recorded in call order;
/// delays and failures trigger when the prompt contains a marker
/// string. A delay at or beyond the caller's timeout is reported as
/// `LlmError::Timeout`, mirroring the real client's behavior.
#[derive(Clone)]
pub struct MockCompletionClient {
    reply: Reply,
    pub calls: Arc<Mutex<Vec<String>>>,
    delays: Vec<(String, Duration)>,
    failures: Vec<(String, MockFailure)>,
}

impl MockCompletionClient {
    pub fn echo() -> Self {
        Self {
            reply: Reply::Echo,
            calls: Arc::new(Mutex::new(Vec::new())),
            delays: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn fixed(reply: &str) -> Self {
        Self {
            reply: Reply::Fixed(reply.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
            delays: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn delay_on(mut self, marker: &str, delay: Duration) -> Self {
        self.delays.push((marker.to_string(), delay));
        self
    }

    pub fn failing_on(mut self, marker: &str, failure: MockFailure) -> Self {
        self.failures.push((marker.to_string(), failure));
        self
    }
}

impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        for (marker, delay) in &self.delays {
            if prompt.contains(marker) {
                if *delay >= timeout {
                    tokio::time::sleep(timeout).await;
                    return Err(LlmError::Timeout);
                }
                tokio::time::sleep(*delay).await;
            }
        }

        for (marker, failure) in &self.failures {
            if prompt.contains(marker) {
                return Err(failure.to_error());
            }
        }

        match &self.reply {
            Reply::Echo => Ok(prompt.to_string()),
            Reply::Fixed(text) => Ok(text.clone()),
        }
    }
}
