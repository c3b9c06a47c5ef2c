use crate::{domain::resource::CatalogResource, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use shared::{errors::HttpError, model::ListQuery};
use std::{collections::HashMap, sync::Arc};
use utoipa_axum::router::OpenApiRouter;

fn parse_resource(slug: &str) -> Result<CatalogResource, HttpError> {
    CatalogResource::from_slug(slug)
        .ok_or_else(|| HttpError::NotFound(format!("Unknown catalogue '{slug}'")))
}

pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    let query = ListQuery::from_params(params);

    let page = state
        .di_container
        .catalog_api
        .list(resource, &query)
        .await?;

    Ok(Json(page))
}

pub async fn get_catalog_entry(
    State(state): State<Arc<AppState>>,
    Path((slug, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    let entry = state.di_container.catalog_api.find(resource, id).await?;

    Ok(Json(entry))
}

pub async fn get_catalog_entry_by_slug(
    State(state): State<Arc<AppState>>,
    Path((slug, entry_slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    let entry = state
        .di_container
        .catalog_api
        .find_by_slug(resource, &entry_slug)
        .await?;

    Ok(Json(entry))
}

pub fn catalog_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/client/{resource}", get(list_catalog))
        .route("/api/client/{resource}/{id}", get(get_catalog_entry))
        .route(
            "/api/client/{resource}/slug/{slug}",
            get(get_catalog_entry_by_slug),
        )
        .with_state(app_state)
}
