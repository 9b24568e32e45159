use async_trait::async_trait;
use shared::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    errors::RepositoryError,
    model::{DeleteOutcome, Product},
};
use std::sync::Arc;

pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, req: &CreateProductRequest)
    -> Result<Product, RepositoryError>;
    async fn update_product(&self, req: &UpdateProductRequest)
    -> Result<Product, RepositoryError>;
    async fn adjust_stock(&self, id: &str, delta: i64) -> Result<Product, RepositoryError>;
    async fn activate_product(&self, id: &str) -> Result<Product, RepositoryError>;
    async fn delete_product(&self, id: &str) -> Result<DeleteOutcome, RepositoryError>;
}
