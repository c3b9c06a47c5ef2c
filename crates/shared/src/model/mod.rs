mod pagination;
mod token;
mod user;

pub use self::pagination::{ListQuery, Paginated};
pub use self::token::{AccessToken, LoginRequest, RefreshRequest, TokenPair};
pub use self::user::{Role, User};
