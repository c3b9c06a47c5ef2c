use crate::{
    abstract_trait::{DynAdminApi, DynAuthApi, DynCatalogApi},
    service::{AdminApiService, ApiClient, AuthApiService, CatalogApiService},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_api: DynAuthApi,
    pub catalog_api: DynCatalogApi,
    pub admin_api: DynAdminApi,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_api", &"DynAuthApi")
            .field("catalog_api", &"DynCatalogApi")
            .field("admin_api", &"DynAdminApi")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let auth_api: DynAuthApi = Arc::new(AuthApiService::new(client.clone()));
        let catalog_api: DynCatalogApi = Arc::new(CatalogApiService::new(client.clone()));
        let admin_api: DynAdminApi = Arc::new(AdminApiService::new(client));

        Self {
            auth_api,
            catalog_api,
            admin_api,
        }
    }
}
