use std::{path::Path, time::Duration};

use reqwest::Client;
use serde::Deserialize;

use crate::llm::{
    client::{CompletionClient, LlmError},
    transcriber::{TranscribeError, Transcriber},
};

/// OpenAI-compatible provider client. Handles both chat completions
/// (map/reduce prompts) and audio transcription.
///
/// The API credential is supplied at construction; nothing is read from
/// the environment inside this client, so tests can point it at a fake
/// endpoint with a fake key via [`OpenAIClient::with_base_url`].
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAIClient {
    const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
            model: Self::DEFAULT_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn send_completion_request(
        &self,
        user_content: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<CompletionResponse, LlmError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": user_content
                }
            ],
            "max_tokens": max_tokens
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(LlmError::Rejected { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    text: String,
}

impl CompletionClient for OpenAIClient {
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let response = self
            .send_completion_request(prompt, max_output_tokens, timeout)
            .await?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| {
                LlmError::MalformedResponse("no content in first completion choice".into())
            })?;

        Ok(text.trim().to_string())
    }
}

impl Transcriber for OpenAIClient {
    const TRANSCRIPTION_MODEL: &'static str = "whisper-1";

    type Error = TranscribeError;

    async fn transcribe(&self, audio_path: &Path) -> Result<String, Self::Error> {
        let bytes = tokio::fs::read(audio_path).await?;
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")
            .unwrap();

        let form = reqwest::multipart::Form::new()
            .text("model", Self::TRANSCRIPTION_MODEL)
            .text("response_format", "json")
            .part("file", part);

        let resp = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(LlmError::from)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(LlmError::Rejected { status, message }.into());
        }

        let response = resp
            .json::<TranscribeResponse>()
            .await
            .map_err(LlmError::from)?;

        Ok(response.text)
    }
}
