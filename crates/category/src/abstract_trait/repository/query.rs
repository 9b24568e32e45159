use async_trait::async_trait;
use shared::{errors::RepositoryError, model::Category};
use std::sync::Arc;

pub type DynCategoryQueryRepository = Arc<dyn CategoryQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Category>, RepositoryError>;
    async fn find_with_product_counts(&self) -> Result<Vec<(Category, usize)>, RepositoryError>;
}
