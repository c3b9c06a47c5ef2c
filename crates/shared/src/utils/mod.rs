mod logs;
mod metrics;
mod shutdown;
mod token_expiry;

pub use self::logs::init_logger;
pub use self::metrics::{GateMetrics, GateOutcome, Method, Metrics, Status};
pub use self::shutdown::shutdown_signal;
pub use self::token_expiry::{cookie_ttl, token_expiry};
