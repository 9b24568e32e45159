use crate::abstract_trait::{CategoryQueryServiceTrait, DynCategoryQueryRepository};
use async_trait::async_trait;
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use shared::{
    domain::responses::{ApiResponse, CategoryResponse, CategoryWithCountResponse},
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status as StatusUtils, TracingContext},
};
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryQueryService {
    query: DynCategoryQueryRepository,
    metrics: Metrics,
}

impl CategoryQueryService {
    pub fn new(query: DynCategoryQueryRepository, registry: &mut Registry) -> Self {
        let metrics = Metrics::new();
        registry.register(
            "category_query_service_request_counter",
            "Total number of requests to the CategoryQueryService",
            metrics.request_counter.clone(),
        );
        registry.register(
            "category_query_service_request_duration",
            "Histogram of request durations for the CategoryQueryService",
            metrics.request_duration.clone(),
        );

        Self { query, metrics }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer("category-query-service")
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
}

#[async_trait]
impl CategoryQueryServiceTrait for CategoryQueryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindAllCategories",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "find_all"),
            ],
        );

        let categories = match self.query.find_all().await {
            Ok(categories) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Categories fetched");
                categories
            }
            Err(err) => {
                error!("❌ Failed to fetch categories: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Failed to fetch categories");
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Categories fetched successfully".to_string(),
            data: categories.into_iter().map(CategoryResponse::from).collect(),
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<ApiResponse<CategoryResponse>, ServiceError> {
        info!("🆔 Fetching category by ID: {id}");

        let tracing_ctx = self.start_tracing(
            "FindCategoryById",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "find_by_id"),
                KeyValue::new("category.id", id.to_string()),
            ],
        );

        let found = match self.query.find_by_id(id).await {
            Ok(found) => found,
            Err(err) => {
                error!("❌ Failed to fetch category {id}: {err:?}");
                self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Failed to fetch category");
                return Err(ServiceError::Repo(err));
            }
        };

        let Some(category) = found else {
            self.complete_tracing(&tracing_ctx, StatusUtils::Error, "Category not found");
            return Err(ServiceError::Repo(RepositoryError::NotFound));
        };

        self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Category fetched");

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Category fetched successfully".to_string(),
            data: CategoryResponse::from(category),
        })
    }

    async fn find_with_product_counts(
        &self,
    ) -> Result<ApiResponse<Vec<CategoryWithCountResponse>>, ServiceError> {
        let tracing_ctx = self.start_tracing(
            "FindCategoriesWithProductCounts",
            vec![
                KeyValue::new("component", "category"),
                KeyValue::new("operation", "find_with_product_counts"),
            ],
        );

        let counted = match self.query.find_with_product_counts().await {
            Ok(counted) => {
                self.complete_tracing(&tracing_ctx, StatusUtils::Success, "Category counts fetched");
                counted
            }
            Err(err) => {
                error!("❌ Failed to fetch category counts: {err:?}");
                self.complete_tracing(
                    &tracing_ctx,
                    StatusUtils::Error,
                    "Failed to fetch category counts",
                );
                return Err(ServiceError::Repo(err));
            }
        };

        Ok(ApiResponse {
            status: "success".to_string(),
            message: "Categories fetched successfully".to_string(),
            data: counted
                .into_iter()
                .map(CategoryWithCountResponse::from)
                .collect(),
        })
    }
}
