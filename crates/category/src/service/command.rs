use crate::abstract_trait::{CategoryCommandServiceTrait, DynCategoryCommandRepository};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::requests::{CreateCategoryRequest, UpdateCategoryRequest},
    domain::responses::{ApiResponse, CategoryResponse},
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct CategoryCommandService {
    command: DynCategoryCommandRepository,
    metrics: Metrics,
}

impl CategoryCommandService {
    pub fn new(command: DynCategoryCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "category_command_service_request_counter",
            "Total number of requests to the CategoryCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "category_command_service_request_duration",
            "Histogram of request durations for the CategoryCommandService",
            metrics.request_duration.clone(),
        );

        Self { command, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("category-command-service")
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
impl CategoryCommandServiceTrait for CategoryCommandService {
    async fn create_category(
        &self,
        req: &CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🏗️ Creating new category: {}", req.name);

        let method = Method::Create;
        let tracing_ctx = self.start_tracing(
            "CreateCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "create"),
                KeyValue::new("category.name", req.name.clone()),
            ],
        );

        if let Err(errors) = req.validate() {
            error!("❌ Invalid create category request: {errors:?}");
            self.complete_tracing_error(&tracing_ctx, method, "Invalid create category request");
            return Err(ServiceError::from(errors));
        }

        let category = match self.command.create_category(req).await {
            Ok(category) => {
                self.complete_tracing_success(&tracing_ctx, method, "Category created successfully");
                category
            }
            Err(err) => {
                error!("❌ Failed to create category: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to create category");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = CategoryResponse::from(category);

        info!(
            "✅ Category created successfully: {} (ID: {})",
            response.name, response.id
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Category created successfully".to_string(),
            data: response,
        })
    }

    async fn update_category(
        &self,
        req: &UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("✏️ Updating category with ID: {}", req.id);

        let method = Method::Update;
        let tracing_ctx = self.start_tracing(
            "UpdateCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "update"),
                KeyValue::new("category.id", req.id.clone()),
            ],
        );

        if let Err(errors) = req.validate() {
            error!("❌ Invalid update category request: {errors:?}");
            self.complete_tracing_error(&tracing_ctx, method, "Invalid update category request");
            return Err(ServiceError::from(errors));
        }

        let category = match self.command.update_category(req).await {
            Ok(category) => {
                self.complete_tracing_success(&tracing_ctx, method, "Category updated successfully");
                category
            }
            Err(err) => {
                error!("❌ Failed to update category {}: {err:?}", req.id);
                self.complete_tracing_error(&tracing_ctx, method, "Failed to update category");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = CategoryResponse::from(category);

        info!(
            "✅ Category updated successfully: {} (ID: {})",
            response.name, response.id
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Category updated successfully".to_string(),
            data: response,
        })
    }

    async fn delete_category(&self, id: &str) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting category with ID: {id}");

        let method = Method::Delete;
        let tracing_ctx = self.start_tracing(
            "DeleteCategory",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        match self.command.delete_category(id).await {
            Ok(()) => {
                self.complete_tracing_success(&tracing_ctx, method, "Category deleted successfully");
            }
            Err(err) => {
                error!("❌ Failed to delete category {id}: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to delete category");
                return Err(ServiceError::Repo(err));
            }
        }

        info!("✅ Category deleted: {id}");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Category deleted successfully".to_string(),
            data: (),
        })
    }
}
