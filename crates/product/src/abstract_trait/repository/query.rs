use async_trait::async_trait;
use shared::{domain::responses::ProductStatistics, errors::RepositoryError, model::Product};
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(&self, include_inactive: bool) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_sku(&self, sku: &str) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_category(&self, category_id: &str) -> Result<Vec<Product>, RepositoryError>;
    async fn find_low_stock(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_out_of_stock(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn search(&self, term: &str) -> Result<Vec<Product>, RepositoryError>;
    async fn statistics(&self) -> Result<ProductStatistics, RepositoryError>;
}
