use crate::{domain::resource::AdminResource, middleware::Identity, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use shared::{errors::HttpError, model::ListQuery};
use std::{collections::HashMap, sync::Arc};
use tracing::info;

fn parse_resource(slug: &str) -> Result<AdminResource, HttpError> {
    AdminResource::from_slug(slug)
        .ok_or_else(|| HttpError::NotFound(format!("Unknown resource '{slug}'")))
}

fn ensure_writable(identity: &Identity, resource: AdminResource) -> Result<(), HttpError> {
    if identity.decision.can_write() {
        return Ok(());
    }

    info!(
        "Read-only user {} attempted to modify {}",
        identity.user.username,
        resource.slug()
    );
    Err(HttpError::Forbidden("Read-only access".into()))
}

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    let query = ListQuery::from_params(params);

    let page = state
        .di_container
        .admin_api
        .list(resource, &query, &identity.access_token)
        .await?;

    Ok(Json(page))
}

pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path((slug, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;

    let entry = state
        .di_container
        .admin_api
        .find(resource, id, &identity.access_token)
        .await?;

    Ok(Json(entry))
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path(slug): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    ensure_writable(&identity, resource)?;

    let created = state
        .di_container
        .admin_api
        .create(resource, &body, &identity.access_token)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path((slug, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    ensure_writable(&identity, resource)?;

    let updated = state
        .di_container
        .admin_api
        .update(resource, id, &body, &identity.access_token)
        .await?;

    Ok(Json(updated))
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Path((slug, id)): Path<(String, i64)>,
) -> Result<impl IntoResponse, HttpError> {
    let resource = parse_resource(&slug)?;
    ensure_writable(&identity, resource)?;

    state
        .di_container
        .admin_api
        .delete(resource, id, &identity.access_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
