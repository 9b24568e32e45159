use async_trait::async_trait;
use shared::{
    domain::requests::{CreateCategoryRequest, UpdateCategoryRequest},
    domain::responses::{ApiResponse, CategoryResponse},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynCategoryCommandService = Arc<dyn CategoryCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryCommandServiceTrait {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn update_category(
        &self,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn delete_category(&self, id: &str) -> Result<ApiResponse<()>, ServiceError>;
}
