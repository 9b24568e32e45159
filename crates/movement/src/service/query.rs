use crate::abstract_trait::{DynMovementQueryRepository, MovementQueryServiceTrait};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::requests::{AuditFilter, MovementFilter},
    domain::responses::{
        ApiResponse, AuditEntryResponse, MovementResponse, MovementStatistics, PeriodReport,
        StockConsistencyReport, StockHistoryEntry, TopProduct,
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct MovementQueryService {
    query: DynMovementQueryRepository,
    metrics: Metrics,
}

impl MovementQueryService {
    pub fn new(query: DynMovementQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "movement_query_service_request_counter",
            "Total number of requests to the MovementQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "movement_query_service_request_duration",
            "Histogram of request durations for the MovementQueryService",
            metrics.request_duration.clone(),
        );

        Self { query, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("movement-query-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Internal)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing(&self, tracing_ctx: &TracingContext, status: StatusUtils, message: &str) {
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        self.metrics.record(Method::Read, status, elapsed);
        tracing_ctx.cx.span().end();
    }

    fn movement_list_response(
        &self,
        tracing_ctx: &TracingContext,
        result: Result<Vec<shared::model::Movement>, RepositoryError>,
        context: &str,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError> {
        let movements = match result {
            Ok(movements) => {
                self.complete_tracing(tracing_ctx, StatusUtils::Success, context);
                movements
            }
            Err(err) => {
                error!("❌ {context} failed: {err:?}");
                self.complete_tracing(tracing_ctx, StatusUtils::Error, context);
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Movements fetched successfully".to_string(),
            data: movements.into_iter().map(MovementResponse::from).collect(),
        })
    }
}

#[async_trait]
impl MovementQueryServiceTrait for MovementQueryService {
    async fn find_all(
        &self,
        filter: &MovementFilter,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindAllMovements",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let result = self.query.find_all(filter).await;
        self.movement_list_response(&tracing_ctx, result, "Fetch all movements")
    }

    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<MovementResponse>, ServiceError> {
        info!("🆔 Fetching movement by ID: {id}");

        let tracing_ctx = self.start_tracing(
            "FindMovementById",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("movement.id", id.to_string()),
            ],
        );

        let found = match self.query.find_by_id(id).await {
            Ok(found) => found,
            Err(err) => {
                error!("❌ Failed to fetch movement {id}: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Failed to fetch movement");
                return Err(ServiceError::Repo(err));
            }
        };

        let Some(movement) = found else {
            self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Movement not found");
            return Err(ServiceError::Repo(RepositoryError::NotFound));
        };

        self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Movement fetched");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Movement fetched successfully".to_string(),
            data: MovementResponse::from(movement),
        })
    }

    async fn find_by_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindMovementsByProduct",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "find_by_product"),
                KeyValue::new("movement.product_id", product_id.to_string()),
            ],
        );

        let result = self.query.find_by_product(product_id).await;
        self.movement_list_response(&tracing_ctx, result, "Fetch movements by product")
    }

    async fn find_recent(
        &self,
        days: i64,
    ) -> Result<ApiResponse<Vec<MovementResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindRecentMovements",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "find_recent"),
                KeyValue::new("movement.days", days.to_string()),
            ],
        );

        let result = self.query.find_recent(days).await;
        self.movement_list_response(&tracing_ctx, result, "Fetch recent movements")
    }

    async fn stock_history(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<Vec<StockHistoryEntry>>, ServiceError> {
        info!("📜 Replaying stock history for {product_id}");

        let tracing_ctx = self.start_tracing(
            "StockHistory",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "stock_history"),
                KeyValue::new("movement.product_id", product_id.to_string()),
            ],
        );

        let history = match self.query.stock_history(product_id).await {
            Ok(history) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "History replayed");
                history
            }
            Err(err) => {
                error!("❌ Failed to replay history for {product_id}: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "History replay failed");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Stock history replayed successfully".to_string(),
            data: history,
        })
    }

    async fn statistics(&self) -> Result<ApiResponse<MovementStatistics>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "MovementStatistics",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "statistics"),
            ],
        );

        let stats = match self.query.statistics().await {
            Ok(stats) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Statistics computed");
                stats
            }
            Err(err) => {
                error!("❌ Failed to compute movement statistics: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Statistics failed");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Movement statistics computed successfully".to_string(),
            data: stats,
        })
    }

    async fn period_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<ApiResponse<PeriodReport>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "PeriodReport",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "period_report"),
                KeyValue::new("report.from", from.to_rfc3339()),
                KeyValue::new("report.to", to.to_rfc3339()),
            ],
        );

        let report = match self.query.period_report(from, to).await {
            Ok(report) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Report generated");
                report
            }
            Err(err) => {
                error!("❌ Failed to generate period report: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Report failed");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Period report generated successfully".to_string(),
            data: report,
        })
    }

    async fn top_moved(
        &self,
        limit: usize,
    ) -> Result<ApiResponse<Vec<TopProduct>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "TopMovedProducts",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "top_moved"),
                KeyValue::new("movement.limit", limit.to_string()),
            ],
        );

        let ranked = match self.query.top_moved(limit).await {
            Ok(ranked) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Ranking computed");
                ranked
            }
            Err(err) => {
                error!("❌ Failed to rank products by movement: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Ranking failed");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Top moved products computed successfully".to_string(),
            data: ranked,
        })
    }

    async fn verify_consistency(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<StockConsistencyReport>, ServiceError> {
        info!("🔎 Verifying stock consistency for {product_id}");

        let tracing_ctx = self.start_tracing(
            "VerifyConsistency",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "verify_consistency"),
                KeyValue::new("movement.product_id", product_id.to_string()),
            ],
        );

        let report = match self.query.verify_consistency(product_id).await {
            Ok(report) => report,
            Err(err) => {
                error!("❌ Consistency check failed for {product_id}: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Consistency check failed");
                return Err(ServiceError::Repo(err));
            }
        };

        if !report.is_consistent {
            warn!(
                "⚠️ Stock mismatch for {product_id}: recorded {}, computed {}",
                report.recorded_quantity, report.computed_quantity
            );
            self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Stock mismatch detected");
            // Detection only. The caller decides what to do with the gap;
            // nothing here attempts reconciliation.
            return Err(ServiceError::Repo(RepositoryError::InconsistentStock {
                product_id: report.product_id,
                recorded: report.recorded_quantity,
                computed: report.computed_quantity,
            }));
        }

        self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Stock is consistent");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Stock is consistent with the movement ledger".to_string(),
            data: report,
        })
    }

    async fn audit_log(
        &self,
        filter: &AuditFilter,
    ) -> Result<ApiResponse<Vec<AuditEntryResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "AuditLog",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "audit_log"),
            ],
        );

        let entries = match self.query.audit_log(filter).await {
            Ok(entries) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Audit log fetched");
                entries
            }
            Err(err) => {
                error!("❌ Failed to fetch audit log: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Audit log fetch failed");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Audit log fetched successfully".to_string(),
            data: entries.into_iter().map(AuditEntryResponse::from).collect(),
        })
    }
}
