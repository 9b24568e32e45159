pub mod command;
pub mod query;

pub use self::command::MovementCommandRepository;
pub use self::query::MovementQueryRepository;
