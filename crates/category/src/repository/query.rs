use crate::abstract_trait::CategoryQueryRepositoryTrait;
use async_trait::async_trait;
use shared::{errors::RepositoryError, model::Category, storage::SharedDocument};
use tracing::info;

#[derive(Clone)]
pub struct CategoryQueryRepository {
    state: SharedDocument,
}

impl CategoryQueryRepository {
    pub fn new(state: SharedDocument) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for CategoryQueryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let doc = self.state.read().await;
        info!("🔍 Fetching all {} categories", doc.categories.len());
        Ok(doc.categories.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc.find_category(id).cloned())
    }

    async fn find_with_product_counts(&self) -> Result<Vec<(Category, usize)>, RepositoryError> {
        let doc = self.state.read().await;
        let counted = doc
            .categories
            .iter()
            .map(|c| (c.clone(), doc.category_reference_count(&c.id)))
            .collect();
        Ok(counted)
    }
}
