pub mod repository;
pub mod service;

pub use self::repository::{
    DynMovementCommandRepository, DynMovementQueryRepository, MovementCommandRepositoryTrait,
    MovementQueryRepositoryTrait,
};
pub use self::service::{
    DynMovementCommandService, DynMovementQueryService, MovementCommandServiceTrait,
    MovementQueryServiceTrait,
};
