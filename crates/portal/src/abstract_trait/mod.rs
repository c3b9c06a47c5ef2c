pub mod admin;
pub mod auth;
pub mod catalog;
pub mod token_store;

pub use self::admin::{AdminApiTrait, DynAdminApi};
pub use self::auth::{AuthApiTrait, DynAuthApi};
pub use self::catalog::{CatalogApiTrait, DynCatalogApi};
pub use self::token_store::{DynTokenStore, TokenStoreTrait};
