use crate::model::{DeleteOutcome, Product, ProductStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub purchase_price: f64,
    pub sell_price: f64,
    pub currency: String,
    pub margin: f64,
    pub quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub location: String,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.id,
            sku: value.sku,
            name: value.name,
            description: value.description,
            category_id: value.category_id,
            purchase_price: value.pricing.purchase_price,
            sell_price: value.pricing.sell_price,
            currency: value.pricing.currency,
            margin: value.pricing.margin,
            quantity: value.stock.quantity,
            min_quantity: value.stock.min_quantity,
            max_quantity: value.stock.max_quantity,
            location: value.stock.location,
            status: value.status,
            created_at: value.created_at,
            modified_at: value.modified_at,
        }
    }
}

/// The two distinguishable delete outcomes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum ProductDeleteResponse {
    /// Movements reference the product; it was archived, not removed.
    Deactivated { product: ProductResponse },
    /// Nothing references the product; the record is gone.
    Removed { id: String },
}

impl From<DeleteOutcome> for ProductDeleteResponse {
    fn from(value: DeleteOutcome) -> Self {
        match value {
            DeleteOutcome::Deactivated(product) => ProductDeleteResponse::Deactivated {
                product: ProductResponse::from(product),
            },
            DeleteOutcome::Removed(id) => ProductDeleteResponse::Removed { id },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStatistics {
    pub total_products: usize,
    pub active_products: usize,
    pub inactive_products: usize,
    pub total_units: i64,
    /// Sum of `sell_price * quantity` over active products.
    pub inventory_value: f64,
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    pub average_margin: f64,
}
