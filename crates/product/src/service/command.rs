use crate::abstract_trait::{DynProductCommandRepository, ProductCommandServiceTrait};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::requests::{CreateProductRequest, UpdateProductRequest},
    domain::responses::{ApiResponse, ProductDeleteResponse, ProductResponse},
    errors::ServiceError,
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};
use validator::Validate;

#[derive(Clone)]
pub struct ProductCommandService {
    command: DynProductCommandRepository,
    metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "product_command_service_request_counter",
            "Total number of requests to the ProductCommandService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "product_command_service_request_duration",
            "Histogram of request durations for the ProductCommandService",
            metrics.request_duration.clone(),
        );

        Self { command, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-command-service")
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
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating new product: {} (SKU {})", req.name, req.sku);

        let method = Method::Create;
        let tracing_ctx = self.start_tracing(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.sku", req.sku.clone()),
                KeyValue::new("product.name", req.name.clone()),
            ],
        );

        if let Err(errors) = req.validate() {
            error!("❌ Invalid create product request: {errors:?}");
            self.complete_tracing_error(&tracing_ctx, method, "Invalid create product request");
            return Err(ServiceError::from(errors));
        }

        let product = match self.command.create_product(req).await {
            Ok(product) => {
                self.complete_tracing_success(&tracing_ctx, method, "Product created successfully");
                product
            }
            Err(err) => {
                error!("❌ Failed to create product: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to create product");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!(
            "✅ Product created successfully: {} (ID: {})",
            response.name, response.id
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product created successfully".to_string(),
            data: response,
        })
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("✏️ Updating product with ID: {}", req.id);

        let method = Method::Update;
        let tracing_ctx = self.start_tracing(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "update"),
                KeyValue::new("product.id", req.id.clone()),
            ],
        );

        if let Err(errors) = req.validate() {
            error!("❌ Invalid update product request: {errors:?}");
            self.complete_tracing_error(&tracing_ctx, method, "Invalid update product request");
            return Err(ServiceError::from(errors));
        }

        let product = match self.command.update_product(req).await {
            Ok(product) => {
                self.complete_tracing_success(&tracing_ctx, method, "Product updated successfully");
                product
            }
            Err(err) => {
                error!("❌ Failed to update product {}: {err:?}", req.id);
                self.complete_tracing_error(&tracing_ctx, method, "Failed to update product");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!(
            "✅ Product updated successfully: {} (ID: {})",
            response.name, response.id
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product updated successfully".to_string(),
            data: response,
        })
    }

    async fn adjust_stock(
        &self,
        product_id: &str,
        delta: i64,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("📊 Adjusting stock for product {product_id}: {delta:+}");

        let method = Method::Update;
        let tracing_ctx = self.start_tracing(
            "AdjustStock",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "adjust_stock"),
                KeyValue::new("product.id", product_id.to_string()),
                KeyValue::new("product.delta", delta.to_string()),
            ],
        );

        let product = match self.command.adjust_stock(product_id, delta).await {
            Ok(product) => {
                self.complete_tracing_success(&tracing_ctx, method, "Stock adjusted successfully");
                product
            }
            Err(err) => {
                error!("❌ Failed to adjust stock for {product_id}: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to adjust stock");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!(
            "✅ Stock adjusted: {} (ID: {}), new quantity: {}",
            response.name, response.id, response.quantity
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product stock adjusted successfully".to_string(),
            data: response,
        })
    }

    async fn activate_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Reactivating product with ID: {product_id}");

        let method = Method::Update;
        let tracing_ctx = self.start_tracing(
            "ActivateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "activate"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let product = match self.command.activate_product(product_id).await {
            Ok(product) => {
                self.complete_tracing_success(&tracing_ctx, method, "Product reactivated");
                product
            }
            Err(err) => {
                error!("❌ Failed to reactivate product {product_id}: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to reactivate product");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductResponse::from(product);

        info!(
            "✅ Product reactivated: {} (ID: {})",
            response.name, response.id
        );

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product reactivated successfully".to_string(),
            data: response,
        })
    }

    async fn delete_product(
        &self,
        product_id: &str,
    ) -> Result<ApiResponse<ProductDeleteResponse>, ServiceError> {
        info!("🗑️ Deleting product with ID: {product_id}");

        let method = Method::Delete;
        let tracing_ctx = self.start_tracing(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "delete"),
                KeyValue::new("product.id", product_id.to_string()),
            ],
        );

        let outcome = match self.command.delete_product(product_id).await {
            Ok(outcome) => {
                self.complete_tracing_success(&tracing_ctx, method, "Product deleted");
                outcome
            }
            Err(err) => {
                error!("❌ Failed to delete product {product_id}: {err:?}");
                self.complete_tracing_error(&tracing_ctx, method, "Failed to delete product");
                return Err(ServiceError::Repo(err));
            }
        };

        let response = ProductDeleteResponse::from(outcome);
        let message = match &response {
            ProductDeleteResponse::Deactivated { .. } => {
                "Product archived (it has recorded movements)"
            }
            ProductDeleteResponse::Removed { .. } => "Product deleted permanently",
        };

        info!("✅ {message}: {product_id}");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: message.to_string(),
            data: response,
        })
    }
}
