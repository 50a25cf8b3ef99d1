use std::sync::{Arc, Mutex};

use recap_pipeline::Notifier;

#[derive(Clone)]
pub struct MockNotifier {
    pub messages: Arc<Mutex<Vec<(i64, String)>>>,
    pub fail_with: Option<String>,
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }
}

impl MockNotifier {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl Notifier for MockNotifier {
    type Error = anyhow::Error;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), Self::Error> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.messages.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}
