mod admin;
mod auth;
mod catalog;
mod client;

pub use self::admin::AdminApiService;
pub use self::auth::AuthApiService;
pub use self::catalog::CatalogApiService;
pub use self::client::ApiClient;
