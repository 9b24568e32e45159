mod category;
mod movement;
mod product;

pub use self::category::{CreateCategoryRequest, UpdateCategoryRequest};
pub use self::movement::{
    AuditFilter, MovementFilter, RecordAdjustmentRequest, RecordMovementRequest,
};
pub use self::product::{
    CreateProductRequest, PricingUpdate, StockLevelsUpdate, UpdateProductRequest,
};
