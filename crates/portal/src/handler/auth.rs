use crate::{
    domain::response::SessionResponse,
    guard::LoginTemplate,
    middleware::{SimpleValidatedJson, first_validation_message},
    state::AppState,
};
use askama::Template;
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use shared::{
    errors::{ErrorResponse, HttpError, SessionError},
    model::LoginRequest,
};
use std::sync::Arc;
use tracing::{error, info};
use utoipa_axum::router::OpenApiRouter;
use validator::Validate;

const DASHBOARD_PATH: &str = "/admin/dashboard";
const TITLE: &str = "Administration";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

fn render_login(
    state: &AppState,
    status: StatusCode,
    username: &str,
    error: Option<&str>,
) -> Result<Response, HttpError> {
    let html = LoginTemplate {
        title: TITLE,
        login_path: state.policy.login_path(),
        username,
        error,
    }
    .render()
    .map_err(|e| {
        error!("Failed to render login page: {e}");
        HttpError::Internal("Failed to render login page".into())
    })?;

    Ok((status, Html(html)).into_response())
}

pub async fn login_page(State(state): State<Arc<AppState>>) -> Result<Response, HttpError> {
    render_login(&state, StatusCode::OK, "", None)
}

pub async fn login_form(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, HttpError> {
    let request = LoginRequest {
        username: form.username.trim().to_string(),
        password: form.password,
    };

    if let Err(errors) = request.validate() {
        let message = first_validation_message(&errors);
        return render_login(&state, StatusCode::BAD_REQUEST, &request.username, Some(&message));
    }

    let (session, store) = state.request_session(jar);

    match session.login(&request.username, &request.password).await {
        Ok(_) => Ok((store.jar(), Redirect::to(DASHBOARD_PATH)).into_response()),
        Err(e) => {
            let message = match &e {
                SessionError::InvalidCredentials => "Invalid username or password".to_string(),
                other => format!("Login failed: {other}"),
            };
            let page = render_login(
                &state,
                StatusCode::UNAUTHORIZED,
                &request.username,
                Some(&message),
            )?;
            Ok((store.jar(), page).into_response())
        }
    }
}

pub async fn logout_form(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (session, store) = state.request_session(jar);
    session.logout();

    (store.jar(), Redirect::to(state.policy.login_path()))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token cookies set", body = SessionResponse),
        (status = 400, description = "Missing username or password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login_api(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (session, store) = state.request_session(jar);
    let established = session.login(&body.username, &body.password).await?;

    info!("API login for {}", established.username());

    Ok((
        store.jar(),
        Json(SessionResponse::authenticated("Login successful", established.user)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Token cookies cleared", body = SessionResponse)
    ),
    tag = "Auth"
)]
pub async fn logout_api(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    let (session, store) = state.request_session(jar);
    session.logout();

    (store.jar(), Json(SessionResponse::signed_out()))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user; may set a refreshed access cookie", body = SessionResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let (session, store) = state.request_session(jar);

    match session.restore().await {
        Ok(restored) => (
            store.jar(),
            Json(SessionResponse::authenticated("Session active", restored.user)),
        )
            .into_response(),
        Err(e) => (store.jar(), HttpError::from(e)).into_response(),
    }
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/admin/login", get(login_page).post(login_form))
        .route("/auth/logout", post(logout_form))
        .route("/api/auth/login", post(login_api))
        .route("/api/auth/logout", post(logout_api))
        .route("/api/auth/me", get(me))
        .with_state(app_state)
}
