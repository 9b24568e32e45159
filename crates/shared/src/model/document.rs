use crate::model::audit::AuditEntry;
use crate::model::category::Category;
use crate::model::movement::Movement;
use crate::model::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single persisted document. Every store mutation read-modify-writes
/// this whole structure; there is no partial-write support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDocument {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub movements: Vec<Movement>,
    #[serde(default)]
    pub audit_log: Vec<AuditEntry>,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub revision: u64,
}

impl Default for InventoryDocument {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            products: Vec::new(),
            movements: Vec::new(),
            audit_log: Vec::new(),
            last_updated: Utc::now(),
            revision: 0,
        }
    }
}

impl InventoryDocument {
    /// Marks the document as mutated: bumps the optimistic-concurrency
    /// revision and refreshes the timestamp. Must be called exactly once
    /// per committed mutation, before the document is persisted.
    pub fn touch(&mut self) {
        self.revision += 1;
        self.last_updated = Utc::now();
    }

    pub fn next_category_id(&self) -> String {
        next_id("CAT", 3, self.categories.iter().map(|c| c.id.as_str()))
    }

    pub fn next_product_id(&self) -> String {
        next_id("PROD", 3, self.products.iter().map(|p| p.id.as_str()))
    }

    pub fn next_movement_id(&self) -> String {
        next_id("MOV", 5, self.movements.iter().map(|m| m.id.as_str()))
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn product_has_movements(&self, product_id: &str) -> bool {
        self.movements.iter().any(|m| m.product_id == product_id)
    }

    /// Number of products (of any status) still referencing a category.
    pub fn category_reference_count(&self, category_id: &str) -> usize {
        self.products
            .iter()
            .filter(|p| p.category_id == category_id)
            .count()
    }
}

/// Sequential ids in the `PREFIX-###` shape: one past the highest numeric
/// suffix already present, so imported data with gaps never collides.
fn next_id<'a>(prefix: &str, width: usize, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix)?.strip_prefix('-')?.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}-{:0width$}", max + 1)
}
