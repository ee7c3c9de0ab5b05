//! `IStorage` adapters
//!
//! [`MemoryStorage`] backs tests and the demo binary; [`FileStorage`]
//! persists a single JSON map on disk, written atomically
//! (temp-file-then-rename) so a crashed write never leaves a torn file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing::debug;

use ledgit_core::ports::storage::IStorage;

/// In-memory key-value storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl IStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let items = self.items.lock().expect("storage mutex poisoned");
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut items = self.items.lock().expect("storage mutex poisoned");
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut items = self.items.lock().expect("storage mutex poisoned");
        items.remove(key);
        Ok(())
    }
}

/// File-backed key-value storage
///
/// Keeps every key in one JSON object file. Operations serialize through
/// an async mutex so concurrent writers cannot interleave a
/// read-modify-write cycle.
pub struct FileStorage {
    path: PathBuf,
    guard: tokio::sync::Mutex<()>,
}

impl FileStorage {
    /// Creates a storage adapter over the JSON file at `path`
    ///
    /// The file is created on first write; a missing file reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> anyhow::Result<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).context("Failed to parse storage file")
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err).context("Failed to read storage file"),
        }
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create storage directory")?;
        }

        let content = serde_json::to_string_pretty(map).context("Failed to encode storage map")?;

        // Atomic replace: write to a sibling temp file, then rename over.
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, content)
            .await
            .context("Failed to write storage temp file")?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .context("Failed to replace storage file")?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl IStorage for FileStorage {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let _guard = self.guard.lock().await;
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.guard.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await?;
        debug!(key, "Stored item");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.guard.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
            debug!(key, "Removed item");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").await.unwrap(), None);

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), Some("v".to_string()));

        storage.set_item("k", "v2").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), Some("v2".to_string()));

        storage.remove_item("k").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_remove_absent_is_noop() {
        let storage = MemoryStorage::new();
        storage.remove_item("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("store.json"));

        assert_eq!(storage.get_item("a").await.unwrap(), None);

        storage.set_item("a", "1").await.unwrap();
        storage.set_item("b", "2").await.unwrap();
        assert_eq!(storage.get_item("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(storage.get_item("b").await.unwrap(), Some("2".to_string()));

        storage.remove_item("a").await.unwrap();
        assert_eq!(storage.get_item("a").await.unwrap(), None);
        assert_eq!(storage.get_item("b").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_file_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let storage = FileStorage::new(&path);
            storage.set_item("k", "persisted").await.unwrap();
        }

        let reopened = FileStorage::new(&path);
        assert_eq!(
            reopened.get_item("k").await.unwrap(),
            Some("persisted".to_string())
        );
    }

    #[tokio::test]
    async fn test_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested/deeper/store.json"));
        storage.set_item("k", "v").await.unwrap();
        assert_eq!(storage.get_item("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("store.json"));
        storage.set_item("k", "v").await.unwrap();
        assert!(!dir.path().join("store.json.tmp").exists());
    }
}
