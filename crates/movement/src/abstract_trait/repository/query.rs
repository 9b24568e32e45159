use async_trait::async_trait;
use shared::{
    domain::requests::{AuditFilter, MovementFilter},
    domain::responses::{
        MovementStatistics, PeriodReport, StockConsistencyReport, StockHistoryEntry, TopProduct,
    },
    errors::RepositoryError,
    model::{AuditEntry, Movement},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub type DynMovementQueryRepository = Arc<dyn MovementQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait MovementQueryRepositoryTrait {
    async fn find_all(&self, filter: &MovementFilter) -> Result<Vec<Movement>, RepositoryError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Movement>, RepositoryError>;
    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Movement>, RepositoryError>;
    async fn find_recent(&self, days: i64) -> Result<Vec<Movement>, RepositoryError>;
    async fn stock_history(
        &self,
        product_id: &str,
    ) -> Result<Vec<StockHistoryEntry>, RepositoryError>;
    async fn statistics(&self) -> Result<MovementStatistics, RepositoryError>;
    async fn period_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodReport, RepositoryError>;
    async fn top_moved(&self, limit: usize) -> Result<Vec<TopProduct>, RepositoryError>;
    async fn verify_consistency(
        &self,
        product_id: &str,
    ) -> Result<StockConsistencyReport, RepositoryError>;
    async fn audit_log(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, RepositoryError>;
}
