mod mocks;

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use mocks::{
    audio_fetcher::MockAudioFetcher, llm::MockCompletionClient, notifier::MockNotifier,
    store::MockObjectStore, transcriber::MockTranscriber,
};
use recap_pipeline::{webhook, JobProcessorBuilder};
use tower::util::ServiceExt;

fn update_body(text: &str) -> Body {
    Body::from(
        serde_json::json!({
            "update_id": 1,
            "message": {
                "chat": { "id": 42 },
                "text": text
            }
        })
        .to_string(),
    )
}

fn webhook_request(body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/webhook/telegram")
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}

struct TestBot {
    router: axum::Router,
    notifier: MockNotifier,
    store: MockObjectStore,
}

fn test_bot() -> TestBot {
    let notifier = MockNotifier::default();
    let store = MockObjectStore::default();

    let processor = JobProcessorBuilder::new("/tmp/recap-webhook-test")
        .fetcher(MockAudioFetcher::default())
        .transcriber(MockTranscriber::new("the transcript"))
        .completion_client(MockCompletionClient::fixed("Short\nL1\nL2\nL3\n- H"))
        .notifier(notifier.clone())
        .store(store.clone())
        .build();

    TestBot {
        router: webhook::router(Arc::new(processor)),
        notifier,
        store,
    }
}

async fn wait_for<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_video_link_spawns_a_job() {
    let bot = test_bot();

    let response = bot
        .router
        .oneshot(webhook_request(update_body(
            "https://www.youtube.com/watch?v=abc123",
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The job runs in the background; wait for the final delivery.
    let pending = bot.notifier.messages.clone();
    assert!(
        wait_for(|| pending
            .lock()
            .unwrap()
            .last()
            .is_some_and(|(_, text)| text.starts_with("Summary (short):")))
        .await,
        "background job should deliver the final summary"
    );

    assert!(
        bot.store
            .objects
            .lock()
            .unwrap()
            .keys()
            .any(|k| k.starts_with("summaries/")),
        "background job should persist a summary"
    );

    let messages = bot.notifier.messages.lock().unwrap();
    assert!(messages[0].1.contains("Queued summarization job"));
    assert!(messages
        .last()
        .unwrap()
        .1
        .starts_with("Summary (short):\nShort"));
}

#[tokio::test]
async fn test_message_without_link_gets_a_hint() {
    let bot = test_bot();

    let response = bot
        .router
        .oneshot(webhook_request(update_body("hello bot")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let messages = bot.notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].1.contains("/summarize"));
    assert!(bot.store.objects.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_without_message_is_acknowledged() {
    let bot = test_bot();

    let response = bot
        .router
        .oneshot(webhook_request(Body::from(
            serde_json::json!({ "update_id": 7 }).to_string(),
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(bot.notifier.messages.lock().unwrap().is_empty());
}
