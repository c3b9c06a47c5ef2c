mod dashboard;
mod session;

pub use self::dashboard::DashboardSummary;
pub use self::session::SessionResponse;
