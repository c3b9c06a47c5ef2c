use async_trait::async_trait;
use shared::{
    errors::ApiError,
    model::{LoginRequest, TokenPair, User},
};
use std::sync::Arc;

pub type DynAuthApi = Arc<dyn AuthApiTrait + Send + Sync>;

#[async_trait]
pub trait AuthApiTrait {
    async fn obtain_token(&self, credentials: &LoginRequest) -> Result<TokenPair, ApiError>;
    async fn refresh_token(&self, refresh: &str) -> Result<String, ApiError>;
    async fn who_am_i(&self, access: &str) -> Result<User, ApiError>;
}
