pub mod repository;
pub mod service;

pub use self::repository::{
    DynProductCommandRepository, DynProductQueryRepository, DynStockAdjuster,
    ProductCommandRepositoryTrait, ProductQueryRepositoryTrait, StockAdjusterTrait,
};
pub use self::service::{
    DynProductCommandService, DynProductQueryService, ProductCommandServiceTrait,
    ProductQueryServiceTrait,
};
