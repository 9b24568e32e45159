use crate::model::{Category, InventoryDocument, Movement, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTotals {
    pub categories: usize,
    pub products: usize,
    pub movements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub totals: ExportTotals,
}

/// The interchange shape: the persisted document plus a metadata envelope.
/// Imports tolerate a missing envelope and missing collections, matching
/// what the UI's file dialogs historically produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExportMetadata>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub movements: Vec<Movement>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl ExportDocument {
    pub fn from_document(document: &InventoryDocument) -> Self {
        Self {
            metadata: Some(ExportMetadata {
                version: EXPORT_VERSION.to_string(),
                export_date: Utc::now(),
                totals: ExportTotals {
                    categories: document.categories.len(),
                    products: document.products.len(),
                    movements: document.movements.len(),
                },
            }),
            categories: document.categories.clone(),
            products: document.products.clone(),
            movements: document.movements.clone(),
            last_updated: Some(document.last_updated),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub categories: usize,
    pub products: usize,
    pub movements: usize,
}
