use crate::{abstract_trait::CatalogApiTrait, domain::resource::CatalogResource, service::ApiClient};
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    errors::ApiError,
    model::{ListQuery, Paginated},
};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CatalogApiService {
    client: Arc<ApiClient>,
}

impl CatalogApiService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogApiTrait for CatalogApiService {
    async fn list(
        &self,
        resource: CatalogResource,
        query: &ListQuery,
    ) -> Result<Paginated<Value>, ApiError> {
        debug!("Listing client/{} page {}", resource.slug(), query.page);

        self.client
            .get(
                &format!("client/{}/", resource.slug()),
                &query.to_pairs(),
                None,
            )
            .await
    }

    async fn find(&self, resource: CatalogResource, id: i64) -> Result<Value, ApiError> {
        self.client
            .get(&format!("client/{}/{id}/", resource.slug()), &[], None)
            .await
    }

    async fn find_by_slug(
        &self,
        resource: CatalogResource,
        slug: &str,
    ) -> Result<Value, ApiError> {
        if !resource.supports_slug_lookup() {
            return Err(ApiError::NotFound);
        }

        let page: Paginated<Value> = self
            .client
            .get(
                &format!("client/{}/", resource.slug()),
                &[("slug".to_string(), slug.to_string())],
                None,
            )
            .await?;

        page.results.into_iter().next().ok_or(ApiError::NotFound)
    }
}
