use async_trait::async_trait;
use shared::{errors::RepositoryError, model::Product};
use std::sync::Arc;

pub type DynStockAdjuster = Arc<dyn StockAdjusterTrait + Send + Sync>;

/// The one mutation the movement ledger is allowed to perform on products.
/// The ledger holds this capability, never the whole product store.
#[async_trait]
pub trait StockAdjusterTrait {
    /// Adds `delta` (negative for exits) to the product's on-hand quantity.
    /// Fails with `InsufficientStock` if the result would be negative; the
    /// stored quantity is untouched on failure.
    async fn adjust_stock(&self, product_id: &str, delta: i64)
    -> Result<Product, RepositoryError>;
}
