mod manager;
mod state;
mod store;

pub use self::manager::SessionManager;
pub use self::state::{Session, SessionEvent, SessionState};
pub use self::store::{
    JarTokenStore, MemoryTokenStore, access_fallback_ttl, refresh_fallback_ttl, removal_cookie,
    token_cookie,
};
