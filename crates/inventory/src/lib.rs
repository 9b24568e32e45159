pub mod di;
pub mod exchange;
pub mod state;

pub use self::di::{DependenciesInject, DependenciesInjectDeps};
pub use self::exchange::ExchangeService;
pub use self::state::AppState;
