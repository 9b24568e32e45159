use crate::storage::DEFAULT_STORAGE_KEY;
use anyhow::Result;
use std::path::PathBuf;

/// Where the document lives. With no directory configured the store runs on
/// the in-memory backend and nothing survives the process.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn init() -> Result<Self> {
        dotenv::dotenv().ok();

        let dir = std::env::var("STORAGE_DIR").ok().map(PathBuf::from);
        let key =
            std::env::var("STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            storage: StorageConfig { dir, key },
        })
    }
}
