use crate::abstract_trait::MovementQueryRepositoryTrait;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use shared::{
    domain::requests::{AuditFilter, MovementFilter},
    domain::responses::{
        MovementStatistics, PeriodReport, ProductActivity, ReasonActivity, StockConsistencyReport,
        StockHistoryEntry, TopProduct,
    },
    errors::RepositoryError,
    model::{AuditEntry, Movement, MovementType},
    storage::SharedDocument,
};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Clone)]
pub struct MovementQueryRepository {
    state: SharedDocument,
}

impl MovementQueryRepository {
    pub fn new(state: SharedDocument) -> Self {
        Self { state }
    }

    fn matches(filter: &MovementFilter, movement: &Movement) -> bool {
        if let Some(movement_type) = filter.movement_type
            && movement.movement_type != movement_type
        {
            return false;
        }
        if let Some(product_id) = &filter.product_id
            && &movement.product_id != product_id
        {
            return false;
        }
        if let Some(from) = filter.from
            && movement.timestamp < from
        {
            return false;
        }
        if let Some(to) = filter.to
            && movement.timestamp > to
        {
            return false;
        }
        true
    }
}

#[async_trait]
impl MovementQueryRepositoryTrait for MovementQueryRepository {
    async fn find_all(&self, filter: &MovementFilter) -> Result<Vec<Movement>, RepositoryError> {
        let doc = self.state.read().await;
        let mut movements: Vec<Movement> = doc
            .movements
            .iter()
            .filter(|m| Self::matches(filter, m))
            .cloned()
            .collect();
        movements.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        info!("🔍 Fetched {} movements", movements.len());
        Ok(movements)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Movement>, RepositoryError> {
        let doc = self.state.read().await;
        Ok(doc.movements.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_product(&self, product_id: &str) -> Result<Vec<Movement>, RepositoryError> {
        self.find_all(&MovementFilter {
            product_id: Some(product_id.to_string()),
            ..MovementFilter::default()
        })
        .await
    }

    async fn find_recent(&self, days: i64) -> Result<Vec<Movement>, RepositoryError> {
        self.find_all(&MovementFilter {
            from: Some(Utc::now() - Duration::days(days)),
            ..MovementFilter::default()
        })
        .await
    }

    async fn stock_history(
        &self,
        product_id: &str,
    ) -> Result<Vec<StockHistoryEntry>, RepositoryError> {
        let doc = self.state.read().await;

        // Ledger order is insertion order: oldest first, running balance
        // accumulated as each movement lands.
        let mut balance = 0;
        let history = doc
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .map(|m| {
                let change = m.movement_type.signed(m.quantity);
                balance += change;
                StockHistoryEntry {
                    movement_id: m.id.clone(),
                    timestamp: m.timestamp,
                    movement_type: m.movement_type,
                    quantity: m.quantity,
                    reason: m.reason,
                    user: m.user.clone(),
                    change,
                    resulting_quantity: balance,
                }
            })
            .collect();

        Ok(history)
    }

    async fn statistics(&self) -> Result<MovementStatistics, RepositoryError> {
        let doc = self.state.read().await;

        let mut entries_by_reason: BTreeMap<String, i64> = BTreeMap::new();
        let mut exits_by_reason: BTreeMap<String, i64> = BTreeMap::new();
        let mut active_users: Vec<String> = Vec::new();
        let mut total_entries = 0;
        let mut total_exits = 0;
        let mut units_in = 0;
        let mut units_out = 0;

        for m in &doc.movements {
            match m.movement_type {
                MovementType::Entry => {
                    total_entries += 1;
                    units_in += m.quantity;
                    *entries_by_reason.entry(m.reason.to_string()).or_default() += m.quantity;
                }
                MovementType::Exit => {
                    total_exits += 1;
                    units_out += m.quantity;
                    *exits_by_reason.entry(m.reason.to_string()).or_default() += m.quantity;
                }
            }
            if !active_users.contains(&m.user) {
                active_users.push(m.user.clone());
            }
        }

        Ok(MovementStatistics {
            total_movements: doc.movements.len(),
            total_entries,
            total_exits,
            units_in,
            units_out,
            net_balance: units_in - units_out,
            entries_by_reason,
            exits_by_reason,
            active_users,
            first_movement_at: doc.movements.iter().map(|m| m.timestamp).min(),
            last_movement_at: doc.movements.iter().map(|m| m.timestamp).max(),
        })
    }

    async fn period_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<PeriodReport, RepositoryError> {
        let movements = self
            .find_all(&MovementFilter {
                from: Some(from),
                to: Some(to),
                ..MovementFilter::default()
            })
            .await?;

        let mut by_product: BTreeMap<String, ProductActivity> = BTreeMap::new();
        let mut by_reason: BTreeMap<String, ReasonActivity> = BTreeMap::new();
        let mut units_in = 0;
        let mut units_out = 0;

        for m in &movements {
            let product = by_product.entry(m.product_id.clone()).or_default();
            match m.movement_type {
                MovementType::Entry => {
                    product.entries += m.quantity;
                    units_in += m.quantity;
                }
                MovementType::Exit => {
                    product.exits += m.quantity;
                    units_out += m.quantity;
                }
            }
            product.movements += 1;

            let reason = by_reason
                .entry(m.reason.to_string())
                .or_insert_with(|| ReasonActivity {
                    movement_type: m.movement_type,
                    quantity: 0,
                    movements: 0,
                });
            reason.quantity += m.quantity;
            reason.movements += 1;
        }

        Ok(PeriodReport {
            from,
            to,
            total_movements: movements.len(),
            units_in,
            units_out,
            by_product,
            by_reason,
        })
    }

    async fn top_moved(&self, limit: usize) -> Result<Vec<TopProduct>, RepositoryError> {
        let doc = self.state.read().await;

        let mut per_product: BTreeMap<String, TopProduct> = BTreeMap::new();
        for m in &doc.movements {
            let entry = per_product
                .entry(m.product_id.clone())
                .or_insert_with(|| TopProduct {
                    product_id: m.product_id.clone(),
                    total_entries: 0,
                    total_exits: 0,
                    total_movements: 0,
                });
            match m.movement_type {
                MovementType::Entry => entry.total_entries += m.quantity,
                MovementType::Exit => entry.total_exits += m.quantity,
            }
            entry.total_movements += 1;
        }

        let mut ranked: Vec<TopProduct> = per_product.into_values().collect();
        ranked.sort_by(|a, b| b.total_movements.cmp(&a.total_movements));
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn verify_consistency(
        &self,
        product_id: &str,
    ) -> Result<StockConsistencyReport, RepositoryError> {
        let doc = self.state.read().await;

        let product = doc.find_product(product_id).ok_or(RepositoryError::NotFound)?;

        let movements: Vec<&Movement> = doc
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .collect();

        // Replay oldest to newest; the sum of signed quantities must land
        // exactly on the stored figure.
        let computed: i64 = movements
            .iter()
            .map(|m| m.movement_type.signed(m.quantity))
            .sum();
        let recorded = product.stock.quantity;

        Ok(StockConsistencyReport {
            product_id: product_id.to_string(),
            recorded_quantity: recorded,
            computed_quantity: computed,
            difference: recorded - computed,
            is_consistent: recorded == computed,
            total_movements: movements.len(),
        })
    }

    async fn audit_log(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, RepositoryError> {
        let doc = self.state.read().await;

        let mut entries: Vec<AuditEntry> = doc
            .audit_log
            .iter()
            .filter(|a| {
                if let Some(user) = &filter.user
                    && &a.user != user
                {
                    return false;
                }
                if let Some(action) = filter.action
                    && a.action != action
                {
                    return false;
                }
                if let Some(since) = filter.since
                    && a.timestamp < since
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}
