use crate::di::{DependenciesInject, DependenciesInjectDeps};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    config::AppConfig,
    storage::{DocumentStore, DynStorageBackend, FileBackend, MemoryBackend, SharedDocument},
};
use std::{fmt, sync::Arc};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub document: SharedDocument,
    pub store: DocumentStore,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let mut registry = Registry::default();

        let backend: DynStorageBackend = match &config.storage.dir {
            Some(dir) => Arc::new(FileBackend::new(dir.clone())),
            None => Arc::new(MemoryBackend::new()),
        };
        let store = DocumentStore::new(backend, config.storage.key.clone());

        let document = store
            .load()
            .await
            .context("Failed to load the inventory document")?
            .unwrap_or_default();

        info!(
            "📦 Inventory loaded: {} categories, {} products, {} movements (revision {})",
            document.categories.len(),
            document.products.len(),
            document.movements.len(),
            document.revision
        );

        let state: SharedDocument = Arc::new(RwLock::new(document));

        let deps = DependenciesInjectDeps {
            state: state.clone(),
            store: store.clone(),
        };
        let di_container = DependenciesInject::new(deps, &mut registry);

        Ok(Self {
            di_container,
            registry: Arc::new(registry),
            document: state,
            store,
        })
    }

    /// Isolated state over a fresh in-memory backend.
    pub async fn in_memory() -> Result<Self> {
        Self::new(&AppConfig::default()).await
    }
}
