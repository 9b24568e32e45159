use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    domain::requests::{AuditFilter, MovementFilter},
    domain::responses::{
        ApiResponse, AuditEntryResponse, MovementResponse, MovementStatistics, PeriodReport,
        StockConsistencyReport, StockHistoryEntry, TopProduct,
    },
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynMovementQueryService = Arc<dyn MovementQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait MovementQueryServiceTrait {
    async fn find_all(
        &self,
        filter: &MovementFilter,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<MovementResponse>, ServiceError>;
    async fn find_by_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError>;
    async fn find_recent(
        &self,
        days: i64,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError>;
    async fn stock_history(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<Vec<StockHistoryEntry>>, ServiceError>;
    async fn statistics(&self) -> Result<ApiResponse<MovementStatistics>, ServiceError>;
    async fn period_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ApiResponse<PeriodReport>, ServiceError>;
    async fn top_moved(&self, limit: usize)
    -> Result<ApiResponse<Vec<TopProduct>>, ServiceError>;
    /// Returns the reconciliation report when the replayed ledger matches
    /// the stored quantity; raises `InconsistentStock` when it does not.
    async fn verify_consistency(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<StockConsistencyReport>, ServiceError>;
    async fn audit_log(
        &self,
        filter: &AuditFilter,
    ) -> Result<ApiResponse<Vec<AuditEntryResponse>>, ServiceError>;
}
