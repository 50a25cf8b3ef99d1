//! Telegram webhook surface.
//!
//! One inbound message with a video link spawns one independent
//! pipeline job; the webhook acknowledges immediately so Telegram does
//! not re-deliver the update while the job runs.

use std::sync::{Arc, LazyLock};

use axum::{extract::State, routing::post, Json, Router};
use recap_store::ObjectStore;
use regex::Regex;
use tower_http::cors::CorsLayer;

use crate::{
    llm::client::CompletionClient,
    llm::transcriber::Transcriber,
    media::AudioFetcher,
    notify::Notifier,
    types::{JobId, TelegramUpdate},
    JobProcessor,
};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

/// Builds the webhook router over a shared job processor.
pub fn router<F, T, C, N, O>(processor: Arc<JobProcessor<F, T, C, N, O>>) -> Router
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    C: CompletionClient + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    O: ObjectStore + Send + Sync + 'static,
{
    Router::new()
        .route("/webhook/telegram", post(handle_telegram_update::<F, T, C, N, O>))
        .layer(CorsLayer::permissive())
        .with_state(processor)
}

async fn handle_telegram_update<F, T, C, N, O>(
    State(processor): State<Arc<JobProcessor<F, T, C, N, O>>>,
    Json(update): Json<TelegramUpdate>,
) -> Json<serde_json::Value>
where
    F: AudioFetcher + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    C: CompletionClient + Send + Sync + 'static,
    N: Notifier + Send + Sync + 'static,
    O: ObjectStore + Send + Sync + 'static,
{
    let Some(message) = update.message else {
        return ack();
    };
    let chat_id = message.chat.id;
    let Some(text) = message.text else {
        return ack();
    };

    match extract_video_url(&text) {
        Some(url) => {
            let job = JobId::new();
            tracing::info!(%job, chat_id, "Queueing summarization job");
            processor
                .notify(
                    chat_id,
                    &format!("Queued summarization job {job} - starting..."),
                )
                .await;

            let processor = processor.clone();
            tokio::spawn(async move {
                if let Err(e) = processor.process(chat_id, &url, &job).await {
                    tracing::error!(error = ?e, %job, "Summarization job failed");
                }
            });
        }
        None => {
            processor
                .notify(chat_id, "Send a video link or use /summarize <url>.")
                .await;
        }
    }

    ack()
}

fn ack() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Pulls a video URL out of message text: either the argument of a
/// `/summarize` command, or the first YouTube link anywhere in the text.
pub fn extract_video_url(text: &str) -> Option<String> {
    let text = text.trim();

    if let Some(rest) = text.strip_prefix("/summarize") {
        return rest.split_whitespace().next().map(str::to_string);
    }

    URL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| url.contains("youtube.com") || url.contains("youtu.be"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_bare_youtube_link() {
        assert_eq!(
            extract_video_url("https://www.youtube.com/watch?v=abc123"),
            Some("https://www.youtube.com/watch?v=abc123".to_string())
        );
    }

    #[test]
    fn test_extracts_short_link_from_surrounding_text() {
        assert_eq!(
            extract_video_url("check this out https://youtu.be/abc123 pretty good"),
            Some("https://youtu.be/abc123".to_string())
        );
    }

    #[test]
    fn test_summarize_command_takes_its_argument() {
        assert_eq!(
            extract_video_url("/summarize https://example.com/talk.mp4"),
            Some("https://example.com/talk.mp4".to_string())
        );
    }

    #[test]
    fn test_summarize_command_without_argument() {
        assert_eq!(extract_video_url("/summarize"), None);
        assert_eq!(extract_video_url("/summarize   "), None);
    }

    #[test]
    fn test_plain_text_yields_nothing() {
        assert_eq!(extract_video_url("hello there"), None);
        assert_eq!(
            extract_video_url("https://example.com/not-a-video"),
            None
        );
    }
}
