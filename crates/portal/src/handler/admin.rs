use crate::{
    guard::{AdminPage, GuardView},
    handler::{dashboard, resource},
    middleware::{Identity, edge_gate},
    session::{Session, SessionState},
    state::AppState,
};
use axum::{
    Extension,
    extract::State,
    http::{StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use shared::errors::HttpError;
use std::sync::Arc;
use tracing::error;
use utoipa_axum::router::OpenApiRouter;

pub async fn admin_root() -> Redirect {
    Redirect::to("/admin/dashboard")
}

pub async fn admin_page(
    State(state): State<Arc<AppState>>,
    identity: Option<Extension<Identity>>,
    uri: Uri,
) -> Result<Response, HttpError> {
    let path = uri.path();
    let page = AdminPage::from_path(path)
        .ok_or_else(|| HttpError::NotFound(format!("No admin page at {path}")))?;

    let session = match identity {
        Some(Extension(identity)) => SessionState::Authenticated(Session {
            user: identity.user,
            access_token: identity.access_token,
            refresh_token: None,
        }),
        None => SessionState::Unauthenticated,
    };

    let view = state.guard.evaluate(&session, path);
    let status = match view {
        GuardView::AccessDenied { .. } => StatusCode::FORBIDDEN,
        _ => StatusCode::OK,
    };

    let html = state
        .guard
        .render(&view, &page)
        .map_err(|e| {
            error!("Failed to render {path}: {e}");
            HttpError::Internal("Failed to render page".into())
        })?
        .ok_or_else(|| HttpError::NotFound(format!("No admin page at {path}")))?;

    Ok((status, Html(html)).into_response())
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin", get(admin_root))
        .route("/admin/api/dashboard", get(dashboard::get_dashboard))
        .route(
            "/admin/api/{resource}",
            get(resource::list_entries).post(resource::create_entry),
        )
        .route(
            "/admin/api/{resource}/{id}",
            get(resource::get_entry)
                .patch(resource::update_entry)
                .delete(resource::delete_entry),
        )
        .route("/admin/{*page}", get(admin_page))
        .route_layer(middleware::from_fn_with_state(
            app_state.gate.clone(),
            edge_gate,
        ))
        .with_state(app_state)
}
