//! Chat delivery of progress updates and final payloads.

use std::{fmt::Debug, future::Future};

/// Posts a text message into a chat.
pub trait Notifier {
    type Error: Debug;

    fn send_message(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Notifier backed by the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            base_url: "https://api.telegram.org".into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Notifier for TelegramNotifier {
    type Error = NotifyError;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Self::Error> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text
        });

        let resp = self
            .client
            .post(format!("{}/bot{}/sendMessage", self.base_url, self.token))
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api { status, message });
        }

        Ok(())
    }
}
