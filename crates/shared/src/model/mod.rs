mod audit;
mod category;
mod document;
mod movement;
mod product;

pub use self::audit::{AuditAction, AuditEntry};
pub use self::category::{Category, DEFAULT_CATEGORY_COLOR, DEFAULT_CATEGORY_ICON};
pub use self::document::InventoryDocument;
pub use self::movement::{
    ENTRY_REASONS, EXIT_REASONS, Movement, MovementStatus, MovementType, ReasonCode,
};
pub use self::product::{
    DEFAULT_CURRENCY, DEFAULT_LOCATION, DEFAULT_MAX_QUANTITY, DEFAULT_MIN_QUANTITY, DeleteOutcome,
    Pricing, Product, ProductStatus, StockLevels,
};
