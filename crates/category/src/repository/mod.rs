pub mod command;
pub mod query;

pub use self::command::CategoryCommandRepository;
pub use self::query::CategoryQueryRepository;
