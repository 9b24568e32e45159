use crate::exchange::ExchangeService;
use category::{
    repository::{CategoryCommandRepository, CategoryQueryRepository},
    service::{CategoryCommandService, CategoryQueryService},
};
use movement::{
    repository::{MovementCommandRepository, MovementQueryRepository},
    service::{MovementCommandService, MovementQueryService},
};
use product::{
    abstract_trait::DynStockAdjuster,
    repository::{ProductCommandRepository, ProductQueryRepository},
    service::{ProductCommandService, ProductQueryService},
};
use prometheus_client::registry::Registry;
use shared::storage::{DocumentStore, SharedDocument};
use std::{fmt, sync::Arc};

/// Every store, explicitly constructed and wired over one shared document.
/// Nothing here is global: tests build as many isolated containers as they
/// need.
#[derive(Clone)]
pub struct DependenciesInject {
    pub category_query: CategoryQueryService,
    pub category_command: CategoryCommandService,
    pub product_query: ProductQueryService,
    pub product_command: ProductCommandService,
    pub movement_query: MovementQueryService,
    pub movement_command: MovementCommandService,
    pub exchange: ExchangeService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("category_query", &"CategoryQueryService")
            .field("category_command", &"CategoryCommandService")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("movement_query", &"MovementQueryService")
            .field("movement_command", &"MovementCommandService")
            .field("exchange", &"ExchangeService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub state: SharedDocument,
    pub store: DocumentStore,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps { state, store } = deps;

        let category_query_repo = Arc::new(CategoryQueryRepository::new(state.clone()));
        let category_command_repo =
            Arc::new(CategoryCommandRepository::new(state.clone(), store.clone()));

        let product_query_repo = Arc::new(ProductQueryRepository::new(state.clone()));
        let product_command_repo =
            Arc::new(ProductCommandRepository::new(state.clone(), store.clone()));

        // The ledger sees the product store only through the narrow
        // stock-adjustment capability.
        let adjuster: DynStockAdjuster = product_command_repo.clone();

        let movement_query_repo = Arc::new(MovementQueryRepository::new(state.clone()));
        let movement_command_repo = Arc::new(MovementCommandRepository::new(
            state.clone(),
            store.clone(),
            adjuster,
        ));

        let category_query = CategoryQueryService::new(category_query_repo, registry);
        let category_command = CategoryCommandService::new(category_command_repo, registry);
        let product_query = ProductQueryService::new(product_query_repo, registry);
        let product_command = ProductCommandService::new(product_command_repo, registry);
        let movement_query = MovementQueryService::new(movement_query_repo, registry);
        let movement_command = MovementCommandService::new(movement_command_repo, registry);
        let exchange = ExchangeService::new(state, store, registry);

        Self {
            category_query,
            category_command,
            product_query,
            product_command,
            movement_query,
            movement_command,
            exchange,
        }
    }
}
