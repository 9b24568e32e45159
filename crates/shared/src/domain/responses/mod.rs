mod api;
mod category;
mod export;
mod movement;
mod product;

pub use self::api::ApiResponse;
pub use self::category::{CategoryResponse, CategoryWithCountResponse};
pub use self::export::{
    EXPORT_VERSION, ExportDocument, ExportMetadata, ExportTotals, ImportSummary,
};
pub use self::movement::{
    AuditEntryResponse, MovementResponse, MovementStatistics, PeriodReport, ProductActivity,
    ReasonActivity, StockConsistencyReport, StockHistoryEntry, TopProduct,
};
pub use self::product::{ProductDeleteResponse, ProductResponse, ProductStatistics};
