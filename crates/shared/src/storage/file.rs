use crate::errors::StorageError;
use crate::storage::backend::StorageBackend;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// One JSON file per key under a configured directory. Writes land via a
/// temp file plus rename; readers never observe a torn document.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        debug!("💾 Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("inventory-file-backend-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn read_of_missing_key_is_none() {
        let backend = FileBackend::new(scratch_dir("missing"));
        assert!(backend.read("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = scratch_dir("roundtrip");
        let _ = std::fs::remove_dir_all(&dir);
        let backend = FileBackend::new(dir.clone());

        backend.write("doc", "{\"x\":1}").await.unwrap();
        assert_eq!(backend.read("doc").await.unwrap().unwrap(), "{\"x\":1}");

        backend.remove("doc").await.unwrap();
        assert!(backend.read("doc").await.unwrap().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
