use crate::abstract_trait::{DynMovementCommandRepository, MovementCommandServiceTrait};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::requests::{RecordAdjustmentRequest, RecordMovementRequest},
    domain::responses::{ApiResponse, MovementResponse},
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct MovementCommandService {
    command: DynMovementCommandRepository,
    metrics: Metrics,
}

impl MovementCommandService {
    pub fn new(command: DynMovementCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "movement_command_service_request_counter",
            "Total number of requests to the MovementCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "movement_command_service_request_duration",
            "Histogram of request durations for the MovementCommandService",
            metrics.request_duration.clone(),
        );

        Self { command, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("movement-command-service")
    }

    fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Internal)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    fn complete_tracing_success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete_tracing_internal(tracing_ctx, method, true, message);
    }

    fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message);
    }

    fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            StatusUtils::Success
        } else {
            StatusUtils::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

#[async_trait]
impl MovementCommandServiceTrait for MovementCommandService {
    async fn record_entry(
        &self,
        req: &RecordMovementRequest,
    ) -> Result<ApiResponse<MovementResponse>, ServiceError> {
        info!(
            "📥 Recording entry: {} x{} ({})",
            req.product_id, req.quantity, req.reason
        );

        let method = Method::Create;
        let tracing_ctx = self.start_tracing(
            "RecordEntry",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "record_entry"),
                KeyValue::new("movement.product_id", req.product_id.clone()),
                KeyValue::new("movement.quantity", req.quantity.to_string()),
                KeyValue::new("movement.reason", req.reason.to_string()),
            ],
        );

        let movement = match self.command.record_entry(req).await {
            Ok(movement) => {
                self.complete_tracing_success(&tracing_ctx, method, "Entry recorded successfully");
                movement
            }
            Err(err) => {
                error!("❌ Failed to record entry: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to record entry");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = MovementResponse::from(movement);

        info!(
            "✅ Entry recorded: {} ({} units)",
            response.id, response.quantity
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Entry recorded successfully".to_string(),
            data: response,
        })
    }

    async fn record_exit(
        &self,
        req: &RecordMovementRequest,
    ) -> Result<ApiResponse<MovementResponse>, ServiceError> {
        info!(
            "📤 Recording exit: {} x{} ({})",
            req.product_id, req.quantity, req.reason
        );

        let method = Method::Create;
        let tracing_ctx = self.start_tracing(
            "RecordExit",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "record_exit"),
                KeyValue::new("movement.product_id", req.product_id.clone()),
                KeyValue::new("movement.quantity", req.quantity.to_string()),
                KeyValue::new("movement.reason", req.reason.to_string()),
            ],
        );

        let movement = match self.command.record_exit(req).await {
            Ok(movement) => {
                self.complete_tracing_success(&tracing_ctx, method, "Exit recorded successfully");
                movement
            }
            Err(err) => {
                error!("❌ Failed to record exit: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to record exit");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = MovementResponse::from(movement);

        info!(
            "✅ Exit recorded: {} ({} units)",
            response.id, response.quantity
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Exit recorded successfully".to_string(),
            data: response,
        })
    }

    async fn record_adjustment(
        &self,
        req: &RecordAdjustmentRequest,
    ) -> Result<ApiResponse<MovementResponse>, ServiceError> {
        info!(
            "🛠️ Recording manual adjustment: {} {:+}",
            req.product_id, req.quantity
        );

        let method = Method::Create;
        let tracing_ctx = self.start_tracing(
            "RecordAdjustment",
            vec![
                KeyValue::new("component", "movement"),
                KeyValue::new("operation", "record_adjustment"),
                KeyValue::new("movement.product_id", req.product_id.clone()),
                KeyValue::new("movement.quantity", req.quantity.to_string()),
            ],
        );

        let movement = match self.command.record_adjustment(req).await {
            Ok(movement) => {
                self.complete_tracing_success(&tracing_ctx, method, "Adjustment recorded");
                movement
            }
            Err(err) => {
                error!("❌ Failed to record adjustment: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to record adjustment");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = MovementResponse::from(movement);

        info!(
            "✅ Adjustment recorded: {} ({} {})",
            response.id, response.quantity, response.movement_type
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Adjustment recorded successfully".to_string(),
            data: response,
        })
    }
}
