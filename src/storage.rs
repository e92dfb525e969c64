//! Object storage for exported decks and thumbnails.
//!
//! [`ObjectStorage`] is an injected collaborator so the export
//! pipeline never knows whether bytes land on local disk, a bucket, or
//! a test's in-memory map.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SlidesmithError;

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    /// Public URL the client downloads from.
    pub url: String,
    pub size_bytes: u64,
    /// Provider-side identifier, usable for later deletion.
    pub storage_id: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a buffer under a folder, returning where it landed.
    /// `name_hint` keeps URLs readable; uniqueness comes from the
    /// generated storage id, not the hint.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        name_hint: &str,
    ) -> Result<StoredObject, SlidesmithError>;

    async fn delete(&self, storage_id: &str) -> Result<(), SlidesmithError>;
}

/// Default storage: files under an uploads directory, served by the
/// host at `base_url`.
pub struct LocalDiskStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalDiskStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalDiskStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        name_hint: &str,
    ) -> Result<StoredObject, SlidesmithError> {
        let storage_id = format!("{folder}/{}-{}", Uuid::new_v4().simple(), sanitize(name_hint));
        let path = self.root.join(&storage_id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let size_bytes = bytes.len() as u64;
        tokio::fs::write(&path, bytes).await?;
        Ok(StoredObject {
            url: format!("{}/{storage_id}", self.base_url.trim_end_matches('/')),
            size_bytes,
            storage_id,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), SlidesmithError> {
        tokio::fs::remove_file(self.root.join(storage_id)).await?;
        Ok(())
    }
}

/// Keep hints filesystem- and URL-safe.
fn sanitize(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// In-memory storage for tests.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// When set, every upload fails with this message.
    fail_with: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses every upload, for failure-path tests.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            objects: Arc::default(),
            fail_with: Some(message.into()),
        }
    }

    pub async fn object(&self, storage_id: &str) -> Option<Vec<u8>> {
        self.objects.read().await.get(storage_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        folder: &str,
        name_hint: &str,
    ) -> Result<StoredObject, SlidesmithError> {
        if let Some(message) = &self.fail_with {
            return Err(SlidesmithError::Storage(message.clone()));
        }
        let storage_id = format!("{folder}/{}-{}", Uuid::new_v4().simple(), sanitize(name_hint));
        let size_bytes = bytes.len() as u64;
        self.objects.write().await.insert(storage_id.clone(), bytes);
        Ok(StoredObject {
            url: format!("memory://{storage_id}"),
            size_bytes,
            storage_id,
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), SlidesmithError> {
        self.objects
            .write()
            .await
            .remove(storage_id)
            .map(|_| ())
            .ok_or_else(|| SlidesmithError::NotFound("object not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_hint() {
        assert_eq!(sanitize("My Deck (final).sldk"), "My-Deck--final-.sldk");
        assert_eq!(sanitize(""), "file");
    }

    #[tokio::test]
    async fn test_memory_upload_and_delete() {
        let storage = MemoryStorage::new();
        let stored = storage
            .upload(vec![1, 2, 3], "decks", "deck.sldk")
            .await
            .unwrap();
        assert_eq!(stored.size_bytes, 3);
        assert!(stored.url.starts_with("memory://decks/"));
        assert_eq!(storage.object(&stored.storage_id).await, Some(vec![1, 2, 3]));

        storage.delete(&stored.storage_id).await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_failing_storage_reports_storage_error() {
        let storage = MemoryStorage::failing("bucket unavailable");
        assert!(matches!(
            storage.upload(vec![0], "decks", "x").await,
            Err(SlidesmithError::Storage(_))
        ));
    }
}
