use chrono::Duration;
use std::sync::Arc;

pub const ACCESS_COOKIE: &str = "accessToken";
pub const REFRESH_COOKIE: &str = "refreshToken";

pub type DynTokenStore = Arc<dyn TokenStoreTrait + Send + Sync>;

/// Persistent storage for the bearer token pair. Only the session manager and
/// the edge gate write to it.
pub trait TokenStoreTrait {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set_access_token(&self, token: &str, ttl: Duration);
    fn set_refresh_token(&self, token: &str, ttl: Duration);
    fn clear(&self);
}
