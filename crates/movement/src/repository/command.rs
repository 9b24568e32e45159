use crate::abstract_trait::MovementCommandRepositoryTrait;
use async_trait::async_trait;
use chrono::Utc;
use product::abstract_trait::DynStockAdjuster;
use shared::{
    domain::requests::{RecordAdjustmentRequest, RecordMovementRequest},
    errors::RepositoryError,
    model::{AuditAction, AuditEntry, Movement, MovementStatus, MovementType, ReasonCode},
    storage::{DocumentStore, SharedDocument},
};
use tracing::{error, info};

#[derive(Clone)]
pub struct MovementCommandRepository {
    state: SharedDocument,
    store: DocumentStore,
    adjuster: DynStockAdjuster,
}

impl MovementCommandRepository {
    pub fn new(state: SharedDocument, store: DocumentStore, adjuster: DynStockAdjuster) -> Self {
        Self {
            state,
            store,
            adjuster,
        }
    }

    /// The fixed validation pipeline. Order matters and is part of the
    /// contract: product, quantity, available stock (exits only), reason,
    /// user. The first failing check wins and nothing is mutated.
    async fn validate(
        &self,
        movement_type: MovementType,
        req: &RecordMovementRequest,
    ) -> Result<(), RepositoryError> {
        let doc = self.state.read().await;

        let product = doc
            .find_product(&req.product_id)
            .ok_or_else(|| RepositoryError::MissingProduct(req.product_id.clone()))?;

        if req.quantity <= 0 {
            return Err(RepositoryError::InvalidQuantity(req.quantity));
        }

        // Stock availability outranks the remaining checks: without stock
        // nothing else about an exit matters.
        if movement_type == MovementType::Exit && req.quantity > product.stock.quantity {
            return Err(RepositoryError::InsufficientStock {
                available: product.stock.quantity,
                requested: req.quantity,
            });
        }

        if !req.reason.is_valid_for(movement_type) {
            return Err(RepositoryError::InvalidReasonCode {
                reason: req.reason,
                movement_type,
            });
        }

        if req.user.trim().is_empty() {
            return Err(RepositoryError::MissingUser);
        }

        Ok(())
    }

    async fn record(
        &self,
        movement_type: MovementType,
        req: &RecordMovementRequest,
    ) -> Result<Movement, RepositoryError> {
        self.validate(movement_type, req).await?;

        // All checks passed; apply the stock change through the narrow
        // adjuster capability, then append to the ledger.
        self.adjuster
            .adjust_stock(&req.product_id, movement_type.signed(req.quantity))
            .await?;

        let mut doc = self.state.write().await;
        let mut next = doc.clone();

        let movement = Movement {
            id: next.next_movement_id(),
            movement_type,
            product_id: req.product_id.clone(),
            quantity: req.quantity,
            reason: req.reason,
            timestamp: Utc::now(),
            user: req.user.trim().to_string(),
            notes: req.notes.clone(),
            status: MovementStatus::Completed,
        };

        let action = match movement_type {
            MovementType::Entry => AuditAction::EntryRecorded,
            MovementType::Exit => AuditAction::ExitRecorded,
        };
        next.movements.push(movement.clone());
        next.audit_log.push(AuditEntry {
            timestamp: movement.timestamp,
            action,
            user: movement.user.clone(),
            movement: movement.clone(),
        });

        next.touch();
        self.store.save(&next).await.map_err(|e| {
            error!("❌ Failed to persist movement: {e:?}");
            RepositoryError::from(e)
        })?;
        *doc = next;

        info!(
            "✓ {movement_type} recorded: {} x{} for {} ({})",
            movement.id, movement.quantity, movement.product_id, movement.reason
        );
        Ok(movement)
    }
}

#[async_trait]
impl MovementCommandRepositoryTrait for MovementCommandRepository {
    async fn record_entry(
        &self,
        req: &RecordMovementRequest,
    ) -> Result<Movement, RepositoryError> {
        self.record(MovementType::Entry, req).await
    }

    async fn record_exit(&self, req: &RecordMovementRequest) -> Result<Movement, RepositoryError> {
        self.record(MovementType::Exit, req).await
    }

    async fn record_adjustment(
        &self,
        req: &RecordAdjustmentRequest,
    ) -> Result<Movement, RepositoryError> {
        // Sign picks the direction; the magnitude travels the normal
        // entry/exit path with the adjustment reason forced.
        let movement_type = if req.quantity >= 0 {
            MovementType::Entry
        } else {
            MovementType::Exit
        };

        let data = RecordMovementRequest {
            product_id: req.product_id.clone(),
            quantity: req.quantity.abs(),
            reason: ReasonCode::InventoryAdjustment,
            user: req.user.clone(),
            notes: if req.note.is_empty() {
                "Manual adjustment".to_string()
            } else {
                req.note.clone()
            },
        };

        self.record(movement_type, &data).await
    }
}
