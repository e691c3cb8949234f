//! File-backed storage.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::warn;

use super::{CartStorage, StorageError};

/// Storage backed by a single JSON file holding a map of slots.
///
/// A missing file reads as empty. A corrupt file is logged and treated as
/// empty rather than failing the process; the next `set` rewrites it.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage handle for the given file path.
    ///
    /// The file is created on the first `set`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot map from disk.
    async fn read_slots(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        match serde_json::from_str(&contents) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file is corrupt, treating as empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

#[async_trait]
impl CartStorage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_slots().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.read_slots().await?;
        slots.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(&slots)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cartwheel-{name}-{}.json", std::process::id()))
    }

    #[tokio::test]
    async fn test_get_missing_file_is_absent() {
        let storage = JsonFileStorage::new(scratch_file("missing"));
        assert!(storage.get("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let path = scratch_file("roundtrip");
        let storage = JsonFileStorage::new(&path);

        storage.set("cart", r#"[{"id":1}]"#).await.unwrap();
        let blob = storage.get("cart").await.unwrap();
        assert_eq!(blob.as_deref(), Some(r#"[{"id":1}]"#));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let path = scratch_file("replace");
        let storage = JsonFileStorage::new(&path);

        storage.set("cart", "[]").await.unwrap();
        storage.set("cart", r#"[{"id":2}]"#).await.unwrap();
        assert_eq!(
            storage.get("cart").await.unwrap().as_deref(),
            Some(r#"[{"id":2}]"#)
        );

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let path = scratch_file("keys");
        let storage = JsonFileStorage::new(&path);

        storage.set("cart", "[]").await.unwrap();
        storage.set("wishlist", "[7]").await.unwrap();
        assert_eq!(storage.get("cart").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.get("wishlist").await.unwrap().as_deref(), Some("[7]"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let path = scratch_file("corrupt");
        tokio::fs::write(&path, "not json at all").await.unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.get("cart").await.unwrap().is_none());

        // A set after corruption rewrites the file cleanly.
        storage.set("cart", "[]").await.unwrap();
        assert_eq!(storage.get("cart").await.unwrap().as_deref(), Some("[]"));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
