use crate::abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, ProductResponse, ProductStatistics},
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    query: DynProductQueryRepository,
    metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "product_query_service_request_counter",
            "Total number of requests to the ProductQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "product_query_service_request_duration",
            "Histogram of request durations for the ProductQueryService",
            metrics.request_duration.clone(),
        );

        Self { query, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("product-query-service")
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

    fn list_response(
        &self,
        tracing_ctx: &TracingContext,
        result: Result<Vec<shared::model::Product>, RepositoryError>,
        context: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let products = match result {
            Ok(products) => {
                self.complete_tracing(tracing_ctx, StatusUtils::Success, context);
                products
            }
            Err(err) => {
                error!("❌ {context} failed: {err:?}");
                self.complete_tracing(tracing_ctx, StatusUtils::Error, context);
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Products fetched successfully".to_string(),
            data: products.into_iter().map(ProductResponse::from).collect(),
        })
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        include_inactive: bool,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindAllProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_all"),
                KeyValue::new("product.include_inactive", include_inactive.to_string()),
            ],
        );

        let result = self.query.find_all(include_inactive).await;
        self.list_response(&tracing_ctx, result, "Fetch all products")
    }

    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🆔 Fetching product by ID: {id}");

        let tracing_ctx = self.start_tracing(
            "FindProductById",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let found = match self.query.find_by_id(id).await {
            Ok(found) => found,
            Err(err) => {
                error!("❌ Failed to fetch product {id}: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Failed to fetch product");
                return Err(ServiceError::Repo(err));
            }
        };

        let Some(product) = found else {
            self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Product not found");
            return Err(ServiceError::Repo(RepositoryError::NotFound));
        };

        self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Product fetched");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product fetched successfully".to_string(),
            data: ProductResponse::from(product),
        })
    }

    async fn find_by_sku(&self, sku: &str) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏷️ Fetching product by SKU: {sku}");

        let tracing_ctx = self.start_tracing(
            "FindProductBySku",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_sku"),
                KeyValue::new("product.sku", sku.to_string()),
            ],
        );

        let found = match self.query.find_by_sku(sku).await {
            Ok(found) => found,
            Err(err) => {
                error!("❌ Failed to fetch product by SKU {sku}: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Failed to fetch product");
                return Err(ServiceError::Repo(err));
            }
        };

        let Some(product) = found else {
            self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Product not found");
            return Err(ServiceError::Repo(RepositoryError::NotFound));
        };

        self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Product fetched");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product fetched successfully".to_string(),
            data: ProductResponse::from(product),
        })
    }

    async fn find_by_category(
        &self,
        category_id: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindProductsByCategory",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_by_category"),
                KeyValue::new("category.id", category_id.to_string()),
            ],
        );

        let result = self.query.find_by_category(category_id).await;
        self.list_response(&tracing_ctx, result, "Fetch products by category")
    }

    async fn find_low_stock(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindLowStockProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_low_stock"),
            ],
        );

        let result = self.query.find_low_stock().await;
        self.list_response(&tracing_ctx, result, "Fetch low-stock products")
    }

    async fn find_out_of_stock(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindOutOfStockProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "find_out_of_stock"),
            ],
        );

        let result = self.query.find_out_of_stock().await;
        self.list_response(&tracing_ctx, result, "Fetch out-of-stock products")
    }

    async fn search(&self, term: &str) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        info!("🔎 Searching products: \"{term}\"");

        let tracing_ctx = self.start_tracing(
            "SearchProducts",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "search"),
                KeyValue::new("product.search", term.to_string()),
            ],
        );

        let result = self.query.search(term).await;
        self.list_response(&tracing_ctx, result, "Search products")
    }

    async fn statistics(&self) -> Result<ApiResponse<ProductStatistics>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "ProductStatistics",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "statistics"),
            ],
        );

        let stats = match self.query.statistics().await {
            Ok(stats) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Statistics computed");
                stats
            }
            Err(err) => {
                error!("❌ Failed to compute product statistics: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Statistics failed");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Product statistics computed successfully".to_string(),
            data: stats,
        })
    }
}
