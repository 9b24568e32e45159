use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entry,
    Exit,
}

impl MovementType {
    /// The signed stock delta a movement of this direction applies.
    pub fn signed(&self, quantity: i64) -> i64 {
        match self {
            MovementType::Entry => quantity,
            MovementType::Exit => -quantity,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementType::Entry => write!(f, "ENTRY"),
            MovementType::Exit => write!(f, "EXIT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementStatus {
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    Purchase,
    CustomerReturn,
    InventoryAdjustment,
    TransferIn,
    InitialReceipt,
    RepairCompleted,
    CustomerSale,
    SupplierReturn,
    TransferOut,
    DamageLoss,
    SampleGiveaway,
    TheftLoss,
    Expiration,
}

/// Reasons accepted for ENTRY movements. INVENTORY_ADJUSTMENT is the only
/// code valid in both directions.
pub const ENTRY_REASONS: &[ReasonCode] = &[
    ReasonCode::Purchase,
    ReasonCode::CustomerReturn,
    ReasonCode::InventoryAdjustment,
    ReasonCode::TransferIn,
    ReasonCode::InitialReceipt,
    ReasonCode::RepairCompleted,
];

/// Reasons accepted for EXIT movements.
pub const EXIT_REASONS: &[ReasonCode] = &[
    ReasonCode::CustomerSale,
    ReasonCode::SupplierReturn,
    ReasonCode::InventoryAdjustment,
    ReasonCode::TransferOut,
    ReasonCode::DamageLoss,
    ReasonCode::SampleGiveaway,
    ReasonCode::TheftLoss,
    ReasonCode::Expiration,
];

impl ReasonCode {
    pub fn is_valid_for(&self, movement_type: MovementType) -> bool {
        match movement_type {
            MovementType::Entry => ENTRY_REASONS.contains(self),
            MovementType::Exit => EXIT_REASONS.contains(self),
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ReasonCode::Purchase => "PURCHASE",
            ReasonCode::CustomerReturn => "CUSTOMER_RETURN",
            ReasonCode::InventoryAdjustment => "INVENTORY_ADJUSTMENT",
            ReasonCode::TransferIn => "TRANSFER_IN",
            ReasonCode::InitialReceipt => "INITIAL_RECEIPT",
            ReasonCode::RepairCompleted => "REPAIR_COMPLETED",
            ReasonCode::CustomerSale => "CUSTOMER_SALE",
            ReasonCode::SupplierReturn => "SUPPLIER_RETURN",
            ReasonCode::TransferOut => "TRANSFER_OUT",
            ReasonCode::DamageLoss => "DAMAGE_LOSS",
            ReasonCode::SampleGiveaway => "SAMPLE_GIVEAWAY",
            ReasonCode::TheftLoss => "THEFT_LOSS",
            ReasonCode::Expiration => "EXPIRATION",
        };
        write!(f, "{code}")
    }
}

/// A single recorded stock change. Movements are immutable once committed;
/// the ledger exposes no update or delete operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
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
