use crate::errors::StorageError;
use crate::model::{MovementType, ReasonCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Not found")]
    NotFound,

    #[error("SKU \"{0}\" is already in use")]
    DuplicateSku(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Product \"{0}\" does not exist")]
    MissingProduct(String),

    #[error("User is required")]
    MissingUser,

    #[error("Quantity must be greater than 0, got {0}")]
    InvalidQuantity(i64),

    #[error("Reason {reason} is not valid for {movement_type} movements")]
    InvalidReasonCode {
        reason: ReasonCode,
        movement_type: MovementType,
    },

    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Category \"{id}\" still has {product_count} associated products")]
    CategoryInUse { id: String, product_count: usize },

    #[error("Stock mismatch for \"{product_id}\": recorded {recorded}, computed from movements {computed}")]
    InconsistentStock {
        product_id: String,
        recorded: i64,
        computed: i64,
    },
}
