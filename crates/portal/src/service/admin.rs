use crate::{abstract_trait::AdminApiTrait, domain::resource::AdminResource, service::ApiClient};
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    errors::ApiError,
    model::{ListQuery, Paginated},
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct AdminApiService {
    client: Arc<ApiClient>,
}

impl AdminApiService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn collection(resource: AdminResource) -> String {
        format!("admin/{}/", resource.slug())
    }

    fn item(resource: AdminResource, id: i64) -> String {
        format!("admin/{}/{id}/", resource.slug())
    }
}

#[async_trait]
impl AdminApiTrait for AdminApiService {
    async fn list(
        &self,
        resource: AdminResource,
        query: &ListQuery,
        token: &str,
    ) -> Result<Paginated<Value>, ApiError> {
        self.client
            .get(&Self::collection(resource), &query.to_pairs(), Some(token))
            .await
    }

    async fn find(&self, resource: AdminResource, id: i64, token: &str) -> Result<Value, ApiError> {
        self.client
            .get(&Self::item(resource, id), &[], Some(token))
            .await
    }

    async fn create(
        &self,
        resource: AdminResource,
        body: &Value,
        token: &str,
    ) -> Result<Value, ApiError> {
        let created: Value = self
            .client
            .post(&Self::collection(resource), body, Some(token))
            .await?;

        info!("Created {} entry", resource.slug());
        Ok(created)
    }

    async fn update(
        &self,
        resource: AdminResource,
        id: i64,
        body: &Value,
        token: &str,
    ) -> Result<Value, ApiError> {
        let updated: Value = self
            .client
            .patch(&Self::item(resource, id), body, Some(token))
            .await?;

        info!("Updated {} #{id}", resource.slug());
        Ok(updated)
    }

    async fn delete(&self, resource: AdminResource, id: i64, token: &str) -> Result<(), ApiError> {
        self.client
            .delete(&Self::item(resource, id), Some(token))
            .await?;

        info!("Deleted {} #{id}", resource.slug());
        Ok(())
    }
}
