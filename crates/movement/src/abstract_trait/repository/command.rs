use async_trait::async_trait;
use shared::{
    domain::requests::{RecordAdjustmentRequest, RecordMovementRequest},
    errors::RepositoryError,
    model::Movement,
};
use std::sync::Arc;

pub type DynMovementCommandRepository = Arc<dyn MovementCommandRepositoryTrait + Send + Sync>;

/// Append-only writes. A movement that fails any validation step leaves no
/// trace: no ledger entry, no stock change, no audit record.
#[async_trait]
pub trait MovementCommandRepositoryTrait {
    async fn record_entry(&self, req: &RecordMovementRequest)
    -> Result<Movement, RepositoryError>;
    async fn record_exit(&self, req: &RecordMovementRequest)
    -> Result<Movement, RepositoryError>;
    async fn record_adjustment(
        &self,
        req: &RecordAdjustmentRequest,
    ) -> Result<Movement, RepositoryError>;
}
