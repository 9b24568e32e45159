use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ExportDocument, ImportSummary},
    errors::ServiceError,
    storage::{DocumentStore, SharedDocument},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

/// Whole-document export/import. Works on the same shared state the stores
/// do; an import swaps all three collections at once.
#[derive(Clone)]
pub struct ExchangeService {
    state: SharedDocument,
    store: DocumentStore,
    metrics: Metrics,
}

impl ExchangeService {
    pub fn new(state: SharedDocument, store: DocumentStore, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "exchange_service_request_counter",
            "Total number of requests to the ExchangeService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "exchange_service_request_duration",
            "Histogram of request durations for the ExchangeService",
            metrics.request_duration.clone(),
        );

        Self {
            state,
            store,
            metrics,
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("exchange-service")
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

    fn complete_tracing(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        status: StatusUtils,
        message: &str,
    ) {
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        self.metrics.record(method, status, elapsed);
        tracing_ctx.cx.span().end();
    }

    /// Pretty-printed JSON: the document shape plus a metadata envelope.
    pub async fn export_document(&self) -> Result<ApiResponse<String>, ServiceError> {
        info!("📦 Exporting inventory document");

        let tracing_ctx = self.start_tracing(
            "ExportDocument",
            vec![
                KeyValue::new("component", "exchange"),
                KeyValue::new("operation", "export"),
            ],
        );

        let export = {
            let doc = self.state.read().await;
            ExportDocument::from_document(&doc)
        };

        let json = match serde_json::to_string_pretty(&export) {
            Ok(json) => json,
            Err(e) => {
                error!("❌ Failed to serialize export: {e:?}");
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Read,
                    StatusUtils::Error,
                    "Export serialization failed",
                );
                return Err(ServiceError::Internal(e.to_string()));
            }
        };

        self.complete_tracing(
            &tracing_ctx,
            Method::Read,
            StatusUtils::Success,
            "Document exported",
        );

        info!(
            "✅ Exported {} categories, {} products, {} movements",
            export.categories.len(),
            export.products.len(),
            export.movements.len()
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Inventory exported successfully".to_string(),
            data: json,
        })
    }

    /// Parses an exported document and replaces the three collections.
    /// A parse failure rejects the import outright; the in-memory and
    /// persisted state stay exactly as they were.
    pub async fn import_document(
        &self,
        json: &str,
    ) -> Result<ApiResponse<ImportSummary>, ServiceError> {
        info!("📥 Importing inventory document ({} bytes)", json.len());

        let tracing_ctx = self.start_tracing(
            "ImportDocument",
            vec![
                KeyValue::new("component", "exchange"),
                KeyValue::new("operation", "import"),
            ],
        );

        let parsed: ExportDocument = match serde_json::from_str(json) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("❌ Rejected import, invalid JSON: {e}");
                self.complete_tracing(
                    &tracing_ctx,
                    Method::Update,
                    StatusUtils::Error,
                    "Invalid import format",
                );
                return Err(ServiceError::InvalidImportFormat(e.to_string()));
            }
        };

        let summary = ImportSummary {
            categories: parsed.categories.len(),
            products: parsed.products.len(),
            movements: parsed.movements.len(),
        };

        let mut doc = self.state.write().await;
        let mut next = doc.clone();
        next.categories = parsed.categories;
        next.products = parsed.products;
        next.movements = parsed.movements;
        next.touch();

        if let Err(e) = self.store.save(&next).await {
            error!("❌ Failed to persist imported document: {e:?}");
            self.complete_tracing(
                &tracing_ctx,
                Method::Update,
                StatusUtils::Error,
                "Import persistence failed",
            );
            return Err(ServiceError::from(e));
        }
        *doc = next;

        self.complete_tracing(
            &tracing_ctx,
            Method::Update,
            StatusUtils::Success,
            "Document imported",
        );

        info!(
            "✅ Imported {} categories, {} products, {} movements",
            summary.categories, summary.products, summary.movements
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Inventory imported successfully".to_string(),
            data: summary,
        })
    }
}
