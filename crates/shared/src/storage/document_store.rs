use crate::errors::StorageError;
use crate::model::InventoryDocument;
use crate::storage::backend::DynStorageBackend;
use crate::storage::memory::MemoryBackend;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

pub const DEFAULT_STORAGE_KEY: &str = "inventory";

/// The live in-memory document all repositories read and mutate. Mutations
/// take the write half for the duration of one call; that call is the
/// transaction boundary.
pub type SharedDocument = Arc<RwLock<InventoryDocument>>;

/// Typed load/save of the [`InventoryDocument`] over a string key-value
/// backend. Saves carry the optimistic revision check: a writer whose
/// document does not advance past the persisted revision is rejected
/// instead of silently overwriting another writer's commit.
#[derive(Clone)]
pub struct DocumentStore {
    backend: DynStorageBackend,
    key: String,
}

impl DocumentStore {
    pub fn new(backend: DynStorageBackend, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Fresh store over an isolated in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), DEFAULT_STORAGE_KEY)
    }

    pub async fn load(&self) -> Result<Option<InventoryDocument>, StorageError> {
        let raw = self.backend.read(&self.key).await?;
        match raw {
            None => {
                debug!("No persisted document under key \"{}\"", self.key);
                Ok(None)
            }
            Some(data) => match serde_json::from_str::<InventoryDocument>(&data) {
                Ok(document) => Ok(Some(document)),
                Err(e) => {
                    error!(
                        "❌ Failed to deserialize document under key \"{}\": {e:?}",
                        self.key
                    );
                    Err(StorageError::Serde(e))
                }
            },
        }
    }

    pub async fn save(&self, document: &InventoryDocument) -> Result<(), StorageError> {
        if let Some(persisted) = self.load().await?
            && persisted.revision >= document.revision
        {
            warn!(
                "⚠️ Rejecting stale write: persisted revision {} >= attempted {}",
                persisted.revision, document.revision
            );
            return Err(StorageError::StaleRevision {
                persisted: persisted.revision,
                attempted: document.revision,
            });
        }

        let json = serde_json::to_string(document)?;
        self.backend.write(&self.key, &json).await?;
        debug!(
            "💾 Persisted document at revision {} ({} categories, {} products, {} movements)",
            document.revision,
            document.categories.len(),
            document.products.len(),
            document.movements.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_of_empty_store_is_none() {
        let store = DocumentStore::in_memory();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = DocumentStore::in_memory();
        let mut doc = InventoryDocument::default();
        doc.touch();
        store.save(&doc).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[tokio::test]
    async fn stale_revision_is_rejected() {
        let store = DocumentStore::in_memory();
        let mut doc = InventoryDocument::default();
        doc.touch();
        store.save(&doc).await.unwrap();

        // A second writer that never saw the first commit.
        let stale = InventoryDocument::default();
        let err = store.save(&stale).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::StaleRevision {
                persisted: 1,
                attempted: 0
            }
        ));
    }

    #[tokio::test]
    async fn advancing_revision_is_accepted() {
        let store = DocumentStore::in_memory();
        let mut doc = InventoryDocument::default();
        doc.touch();
        store.save(&doc).await.unwrap();
        doc.touch();
        store.save(&doc).await.unwrap();

        assert_eq!(store.load().await.unwrap().unwrap().revision, 2);
    }
}
