use crate::model::{AuditAction, AuditEntry, Movement, MovementStatus, MovementType, ReasonCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementResponse {
    pub id: String,
    pub movement_type: MovementType,
    pub product_id: String,
    pub quantity: i64,
    pub reason: ReasonCode,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub notes: String,
    pub status: MovementStatus,
}

impl From<Movement> for MovementResponse {
    fn from(value: Movement) -> Self {
        MovementResponse {
            id: value.id,
            movement_type: value.movement_type,
            product_id: value.product_id,
            quantity: value.quantity,
            reason: value.reason,
            timestamp: value.timestamp,
            user: value.user,
            notes: value.notes,
            status: value.status,
        }
    }
}

/// One step of a product's replayed history, oldest first, with the running
/// balance after each movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHistoryEntry {
    pub movement_id: String,
    pub timestamp: DateTime<Utc>,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reason: ReasonCode,
    pub user: String,
    pub change: i64,
    pub resulting_quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockConsistencyReport {
    pub product_id: String,
    pub recorded_quantity: i64,
    pub computed_quantity: i64,
    pub difference: i64,
    pub is_consistent: bool,
    pub total_movements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementStatistics {
    pub total_movements: usize,
    pub total_entries: usize,
    pub total_exits: usize,
    pub units_in: i64,
    pub units_out: i64,
    pub net_balance: i64,
    pub entries_by_reason: BTreeMap<String, i64>,
    pub exits_by_reason: BTreeMap<String, i64>,
    pub active_users: Vec<String>,
    pub first_movement_at: Option<DateTime<Utc>>,
    pub last_movement_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductActivity {
    pub entries: i64,
    pub exits: i64,
    pub movements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReasonActivity {
    pub movement_type: MovementType,
    pub quantity: i64,
    pub movements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_movements: usize,
    pub units_in: i64,
    pub units_out: i64,
    pub by_product: BTreeMap<String, ProductActivity>,
    pub by_reason: BTreeMap<String, ReasonActivity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub product_id: String,
    pub total_entries: i64,
    pub total_exits: i64,
    pub total_movements: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntryResponse {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub user: String,
    pub movement: MovementResponse,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(value: AuditEntry) -> Self {
        AuditEntryResponse {
            timestamp: value.timestamp,
            action: value.action,
            user: value.user,
            movement: MovementResponse::from(value.movement),
        }
    }
}
