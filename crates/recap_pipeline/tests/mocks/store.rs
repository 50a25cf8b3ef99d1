use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use recap_store::ObjectStore;

#[derive(Clone)]
pub struct MockObjectStore {
    pub objects: Arc<Mutex<BTreeMap<String, String>>>,
    pub fail_with: Option<String>,
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self {
            objects: Arc::new(Mutex::new(BTreeMap::new())),
            fail_with: None,
        }
    }
}

impl MockObjectStore {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl ObjectStore for MockObjectStore {
    async fn store_text(&self, key: &str, text: &str) -> anyhow::Result<()> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), text.to_string());
        Ok(())
    }

    async fn load_text(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }
}
