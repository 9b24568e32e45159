use async_trait::async_trait;
use shared::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    domain::responses::{ApiResponse, ProductDeleteResponse, ProductResponse},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn activate_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<ProductDeleteResponse>, ServiceError>;
}
