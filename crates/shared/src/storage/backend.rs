use crate::errors::StorageError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynStorageBackend = Arc<dyn StorageBackend + Send + Sync>;

/// A string key-value store, the shape of the browser storage the original
/// system persisted into. Values are opaque to the backend; serialization
/// lives in [`super::DocumentStore`].
#[async_trait]
pub trait StorageBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
