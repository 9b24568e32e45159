mod command;
mod query;

pub use self::command::{DynMovementCommandService, MovementCommandServiceTrait};
pub use self::query::{DynMovementQueryService, MovementQueryServiceTrait};
