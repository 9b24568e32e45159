mod storage;

pub use self::storage::{AppConfig, StorageConfig};
