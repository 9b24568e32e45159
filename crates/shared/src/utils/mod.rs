mod logs;
mod metrics;
mod telemetry;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status};
pub use self::telemetry::TracingContext;
