use crate::model::{AuditAction, MovementType, ReasonCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for one entry or exit. No derive-level validation here: the ledger
/// checks these fields itself, in the fixed order the contract prescribes
/// (product, quantity, stock, reason, user), and the first failure wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMovementRequest {
    pub product_id: String,

    pub quantity: i64,

    pub reason: ReasonCode,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub notes: String,
}

/// A manual correction. The sign of `quantity` picks the direction; the
/// reason is always INVENTORY_ADJUSTMENT.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAdjustmentRequest {
    pub product_id: String,

    pub quantity: i64,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    pub movement_type: Option<MovementType>,
    pub product_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFilter {
    pub user: Option<String>,
    pub action: Option<AuditAction>,
    pub since: Option<DateTime<Utc>>,
}
