use std::future::Future;

pub mod fs;

pub trait ObjectStore {
    fn store_text(
        &self,
        key: &str,
        text: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn load_text(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
}

impl<T: ObjectStore + Send + Sync> ObjectStore for &T {
    async fn store_text(&self, key: &str, text: &str) -> anyhow::Result<()> {
        (**self).store_text(key, text).await
    }

    async fn load_text(&self, key: &str) -> anyhow::Result<Option<String>> {
        (**self).load_text(key).await
    }
}
