use crate::domain::resource::AdminResource;
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    errors::ApiError,
    model::{ListQuery, Paginated},
};
use std::sync::Arc;

pub type DynAdminApi = Arc<dyn AdminApiTrait + Send + Sync>;

#[async_trait]
pub trait AdminApiTrait {
    async fn list(
        &self,
        resource: AdminResource,
        query: &ListQuery,
        token: &str,
    ) -> Result<Paginated<Value>, ApiError>;
    async fn find(&self, resource: AdminResource, id: i64, token: &str) -> Result<Value, ApiError>;
    async fn create(
        &self,
        resource: AdminResource,
        body: &Value,
        token: &str,
    ) -> Result<Value, ApiError>;
    async fn update(
        &self,
        resource: AdminResource,
        id: i64,
        body: &Value,
        token: &str,
    ) -> Result<Value, ApiError>;
    async fn delete(&self, resource: AdminResource, id: i64, token: &str) -> Result<(), ApiError>;
}
