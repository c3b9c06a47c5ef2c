use crate::domain::resource::CatalogResource;
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    errors::ApiError,
    model::{ListQuery, Paginated},
};
use std::sync::Arc;

pub type DynCatalogApi = Arc<dyn CatalogApiTrait + Send + Sync>;

#[async_trait]
pub trait CatalogApiTrait {
    async fn list(
        &self,
        resource: CatalogResource,
        query: &ListQuery,
    ) -> Result<Paginated<Value>, ApiError>;
    async fn find(&self, resource: CatalogResource, id: i64) -> Result<Value, ApiError>;
    async fn find_by_slug(&self, resource: CatalogResource, slug: &str)
    -> Result<Value, ApiError>;
}
