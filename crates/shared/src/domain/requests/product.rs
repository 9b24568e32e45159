use crate::model::ProductStatus;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Required-field checks (name, sku, category) live in the product store
/// itself so absence surfaces as `MissingField`; the derive only guards the
/// numeric ranges.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub sku: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category_id: String,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Purchase price must not be negative"))]
    pub purchase_price: f64,

    #[serde(default)]
    #[validate(range(min = 0.0, message = "Sell price must not be negative"))]
    pub sell_price: f64,

    #[serde(default)]
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i64,

    pub min_quantity: Option<i64>,

    pub max_quantity: Option<i64>,

    pub location: Option<String>,
}

/// Price fields merge one by one; an omitted field keeps its stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PricingUpdate {
    #[validate(range(min = 0.0, message = "Purchase price must not be negative"))]
    pub purchase_price: Option<f64>,

    #[validate(range(min = 0.0, message = "Sell price must not be negative"))]
    pub sell_price: Option<f64>,

    pub currency: Option<String>,
}

/// Stock configuration merge. Deliberately carries no on-hand quantity:
/// quantity only moves through the movement ledger.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockLevelsUpdate {
    #[validate(range(min = 0, message = "Minimum quantity must not be negative"))]
    pub min_quantity: Option<i64>,

    #[validate(range(min = 0, message = "Maximum quantity must not be negative"))]
    pub max_quantity: Option<i64>,

    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: String,

    #[validate(length(min = 1, message = "SKU must not be blank"))]
    pub sku: Option<String>,

    #[validate(length(min = 1, message = "Product name must not be blank"))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub category_id: Option<String>,

    pub status: Option<ProductStatus>,

    #[validate(nested)]
    pub pricing: Option<PricingUpdate>,

    #[validate(nested)]
    pub stock: Option<StockLevelsUpdate>,
}
