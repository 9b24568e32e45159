use async_trait::async_trait;
use shared::{
    domain::requests::{CreateCategoryRequest, UpdateCategoryRequest},
    errors::RepositoryError,
    model::Category,
};
use std::sync::Arc;

pub type DynCategoryCommandRepository = Arc<dyn CategoryCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CategoryCommandRepositoryTrait {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<Category, RepositoryError>;
    async fn update_category(
        &self,
        req: &UpdateCategoryRequest,
    ) -> Result<Category, RepositoryError>;
    async fn delete_category(&self, id: &str) -> Result<(), RepositoryError>;
}
