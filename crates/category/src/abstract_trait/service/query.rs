use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, CategoryResponse, CategoryWithCountResponse},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynCategoryQueryService = Arc<dyn CategoryQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CategoryQueryServiceTrait {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<CategoryResponse>, ServiceError>;
    async fn find_with_product_counts(
        &self,
    ) -> Result<ApiResponse<Vec<CategoryWithCountResponse>>, ServiceError>;
}
