use async_trait::async_trait;
use shared::{
    domain::requests::{RecordAdjustmentRequest, RecordMovementRequest},
    domain::responses::{ApiResponse, MovementResponse},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynMovementCommandService = Arc<dyn MovementCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait MovementCommandServiceTrait {
    async fn record_entry(
        &self,
        req: &RecordMovementRequest,
    ) -> Result<ApiResponse<MovementResponse>, ServiceError>;
    async fn record_exit(
        &self,
        req: &RecordMovementRequest,
    ) -> Result<ApiResponse<MovementResponse>, ServiceError>;
    async fn record_adjustment(
        &self,
        req: &RecordAdjustmentRequest,
    ) -> Result<ApiResponse<MovementResponse>, ServiceError>;
}
