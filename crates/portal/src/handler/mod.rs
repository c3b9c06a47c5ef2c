mod admin;
mod auth;
mod catalog;
mod dashboard;
mod resource;

use crate::{
    domain::response::{DashboardSummary, SessionResponse},
    state::AppState,
};
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{
    errors::ErrorResponse,
    model::{LoginRequest, Role, User},
    utils::shutdown_signal,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

pub use self::admin::admin_routes;
pub use self::auth::auth_routes;
pub use self::catalog::catalog_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_api,
        auth::logout_api,
        auth::me,
        dashboard::get_dashboard,
        health_checker_handler,
    ),
    components(schemas(LoginRequest, SessionResponse, DashboardSummary, User, Role, ErrorResponse)),
    tags(
        (name = "Auth", description = "Session endpoints backed by token cookies"),
        (name = "Dashboard", description = "Admin dashboard data"),
        (name = "Health", description = "Liveness"),
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/api/healthchecker",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health_checker_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "success",
            "message": "Portal is running"
        })),
    )
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .route("/api/healthchecker", get(health_checker_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(admin_routes(shared_state.clone()))
            .merge(catalog_routes(shared_state));

        let (app_router, api) = api_router
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
            .split_for_parts();

        app_router.route(
            "/api-docs/openapi.json",
            get(move || {
                let api = api.clone();
                async move { Json(api) }
            }),
        )
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("Server running on http://{}", listener.local_addr()?);
        info!("OpenAPI document at http://localhost:{port}/api-docs/openapi.json");
        info!("Metrics at http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}
