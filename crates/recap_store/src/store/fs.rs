use std::path::{Component, Path, PathBuf};

use anyhow::Context;

use crate::store::ObjectStore;

/// Filesystem-backed object store. Keys map to paths relative to the
/// store root, so `summaries/abc.json` lands at `{root}/summaries/abc.json`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Creates the store root directory if it does not exist.
    pub async fn init(root: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let root = root.into();

        tokio::fs::create_dir_all(&root)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, root = ?root, "Failed to create store root"))
            .context("Failed to create object store root directory")?;

        Ok(FsObjectStore { root })
    }

    fn resolve(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && Path::new(key)
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            anyhow::bail!("Invalid object key: {key:?}");
        }
        Ok(self.root.join(key))
    }
}

impl ObjectStore for FsObjectStore {
    async fn store_text(&self, key: &str, text: &str) -> anyhow::Result<()> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create object parent directory")?;
        }

        tokio::fs::write(&path, text)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, key, "Failed to write object"))
            .with_context(|| format!("Failed to write object {key}"))?;

        tracing::debug!(key, bytes = text.len(), "Stored text object");
        Ok(())
    }

    async fn load_text(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.resolve(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!(error = ?e, key, "Failed to read object");
                Err(e).with_context(|| format!("Failed to read object {key}"))
            }
        }
    }
}
