mod command;
mod query;

pub use self::command::{DynMovementCommandRepository, MovementCommandRepositoryTrait};
pub use self::query::{DynMovementQueryRepository, MovementQueryRepositoryTrait};
