use async_trait::async_trait;
use shared::{
    domain::responses::{ApiResponse, ProductResponse, ProductStatistics},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        include_inactive: bool,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn find_by_sku(&self, sku: &str) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn find_by_category(
        &self,
        category_id: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_low_stock(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_out_of_stock(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn search(&self, term: &str) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn statistics(&self) -> Result<ApiResponse<ProductStatistics>, ServiceError>;
}
