use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_MIN_QUANTITY: i64 = 5;
pub const DEFAULT_MAX_QUANTITY: i64 = 100;
pub const DEFAULT_LOCATION: &str = "Main Warehouse";
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    Active,
    Inactive,
    Discontinued,
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductStatus::Active => write!(f, "ACTIVE"),
            ProductStatus::Inactive => write!(f, "INACTIVE"),
            ProductStatus::Discontinued => write!(f, "DISCONTINUED"),
        }
    }
}

/// Purchase/sell pricing. `margin` is derived from the two prices and must
/// be recomputed whenever either one changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub purchase_price: f64,
    pub sell_price: f64,
    pub currency: String,
    pub margin: f64,
}

impl Pricing {
    pub fn new(purchase_price: f64, sell_price: f64) -> Self {
        let mut pricing = Self {
            purchase_price,
            sell_price,
            currency: DEFAULT_CURRENCY.to_string(),
            margin: 0.0,
        };
        pricing.recompute_margin();
        pricing
    }

    /// Margin as a percentage of the purchase price, rounded to 2 decimals.
    pub fn recompute_margin(&mut self) {
        self.margin = if self.purchase_price > 0.0 {
            let raw = (self.sell_price - self.purchase_price) / self.purchase_price * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLevels {
    pub quantity: i64,
    pub min_quantity: i64,
    pub max_quantity: i64,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category_id: String,
    pub pricing: Pricing,
    pub stock: StockLevels,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock.quantity <= self.stock.min_quantity
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock.quantity == 0
    }
}

/// Deleting a product takes one of two paths depending on whether movements
/// reference it: a referenced product is only deactivated so the ledger keeps
/// resolving, an unreferenced one is removed outright.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deactivated(Product),
    Removed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_is_percentage_of_purchase_price() {
        let pricing = Pricing::new(50.0, 75.0);
        assert_eq!(pricing.margin, 50.0);
    }

    #[test]
    fn margin_is_zero_without_purchase_price() {
        let pricing = Pricing::new(0.0, 99.0);
        assert_eq!(pricing.margin, 0.0);
    }

    #[test]
    fn margin_rounds_to_two_decimals() {
        let pricing = Pricing::new(3.0, 4.0);
        assert_eq!(pricing.margin, 33.33);
    }
}
