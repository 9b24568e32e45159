mod backend;
mod document_store;
mod file;
mod memory;

pub use self::backend::{DynStorageBackend, StorageBackend};
pub use self::document_store::{DEFAULT_STORAGE_KEY, DocumentStore, SharedDocument};
pub use self::file::FileBackend;
pub use self::memory::MemoryBackend;
