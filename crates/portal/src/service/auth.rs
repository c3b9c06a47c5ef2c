use crate::{abstract_trait::AuthApiTrait, service::ApiClient};
use async_trait::async_trait;
use shared::{
    errors::ApiError,
    model::{AccessToken, LoginRequest, RefreshRequest, TokenPair, User},
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct AuthApiService {
    client: Arc<ApiClient>,
}

impl AuthApiService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApiTrait for AuthApiService {
    async fn obtain_token(&self, credentials: &LoginRequest) -> Result<TokenPair, ApiError> {
        info!("Requesting token pair for user: {}", credentials.username);

        let pair: TokenPair = self
            .client
            .post("token/", credentials, None)
            .await
            .inspect_err(|e| warn!("Token request failed for {}: {e}", credentials.username))?;

        Ok(pair)
    }

    async fn refresh_token(&self, refresh: &str) -> Result<String, ApiError> {
        let body = RefreshRequest {
            refresh: refresh.to_string(),
        };

        let token: AccessToken = self
            .client
            .post("token/refresh/", &body, None)
            .await
            .inspect_err(|e| warn!("Refresh exchange rejected: {e}"))?;

        info!("Access token refreshed");
        Ok(token.access)
    }

    async fn who_am_i(&self, access: &str) -> Result<User, ApiError> {
        self.client.get("admin/users/me/", &[], Some(access)).await
    }
}
