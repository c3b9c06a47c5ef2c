#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use portal::{handler::AppRouter, state::AppState};
use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};
use shared::config::Config;
use std::{
    collections::{HashMap, HashSet},
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use tokio::net::TcpListener;

/// Stand-in for the REST backend with a fixed set of users and tokens.
#[derive(Default)]
pub struct Backend {
    pub token_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    revoked: Mutex<HashSet<String>>,
}

impl Backend {
    pub fn revoke(&self, token: &str) {
        self.revoked.lock().unwrap().insert(token.to_string());
    }

    pub fn me_calls(&self) -> usize {
        self.me_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn is_revoked(&self, token: &str) -> bool {
        self.revoked.lock().unwrap().contains(token)
    }

    fn user_for(&self, access: &str) -> Option<Value> {
        if self.is_revoked(access) {
            return None;
        }

        let (id, username, role) = match access {
            "acc-admin" => (1, "ada", "admin"),
            "acc-editor" | "acc-editor-2" => (2, "marie", "editor"),
            "acc-viewer" => (3, "victor", "viewer"),
            _ => return None,
        };

        Some(json!({
            "id": id,
            "username": username,
            "email": format!("{username}@example.com"),
            "role": role,
            "is_active": true,
            "date_joined": "2024-01-15T08:00:00Z"
        }))
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Given token not valid for any token type" })),
    )
        .into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn obtain_token(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    backend.token_calls.fetch_add(1, Ordering::SeqCst);

    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "username": ["This field may not be blank."] })),
        )
            .into_response();
    }

    let prefix = match (username, password) {
        ("ada", "secret") => "admin",
        ("marie", "secret") => "editor",
        ("victor", "secret") => "viewer",
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "No active account found with the given credentials" })),
            )
                .into_response();
        }
    };

    Json(json!({
        "access": format!("acc-{prefix}"),
        "refresh": format!("ref-{prefix}")
    }))
    .into_response()
}

async fn refresh_token(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    backend.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let refresh = body["refresh"].as_str().unwrap_or_default();
    if refresh == "ref-editor" && !backend.is_revoked(refresh) {
        return Json(json!({ "access": "acc-editor-2" })).into_response();
    }

    unauthorized()
}

async fn who_am_i(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    backend.me_calls.fetch_add(1, Ordering::SeqCst);

    match bearer(&headers).and_then(|token| backend.user_for(&token)) {
        Some(user) => Json(user).into_response(),
        None => unauthorized(),
    }
}

async fn admin_list(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(resource): Path<String>,
) -> Response {
    if bearer(&headers).and_then(|t| backend.user_for(&t)).is_none() {
        return unauthorized();
    }

    let page = match resource.as_str() {
        "users" => json!({
            "count": 3,
            "next": null,
            "previous": null,
            "results": [
                { "id": 1, "username": "ada", "role": "admin" },
                { "id": 2, "username": "marie", "role": "editor" },
                { "id": 3, "username": "victor", "role": null }
            ]
        }),
        "games" => json!({ "count": 12, "next": null, "previous": null, "results": [] }),
        "game-types" => json!({ "count": 4, "next": null, "previous": null, "results": [] }),
        "countries" => json!({ "count": 7, "next": null, "previous": null, "results": [] }),
        "results" => json!({ "count": 9, "next": null, "previous": null, "results": [] }),
        "predictions" => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "boom" })),
            )
                .into_response();
        }
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    Json(page).into_response()
}

async fn admin_create(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(_resource): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers).and_then(|t| backend.user_for(&t)).is_none() {
        return unauthorized();
    }

    if body.get("name").and_then(Value::as_str).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "name": ["This field is required."] })),
        )
            .into_response();
    }

    let mut created = body;
    created["id"] = json!(42);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn client_list(
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let results = match (resource.as_str(), params.get("slug").map(String::as_str)) {
        ("game-types", Some("football")) => vec![json!({ "id": 5, "name": "Football", "slug": "football" })],
        ("game-types", Some(_)) => vec![],
        ("games", None) => vec![json!({ "id": 1, "name": "Cup final" })],
        _ => vec![],
    };

    Json(json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results
    }))
    .into_response()
}

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

pub async fn spawn_backend() -> (SocketAddr, Arc<Backend>) {
    let backend = Arc::new(Backend::default());

    let router = Router::new()
        .route("/api/token/", post(obtain_token))
        .route("/api/token/refresh/", post(refresh_token))
        .route("/api/admin/users/me/", get(who_am_i))
        .route("/api/admin/{resource}/", get(admin_list).post(admin_create))
        .route("/api/client/{resource}/", get(client_list))
        .with_state(backend.clone());

    (serve(router).await, backend)
}

pub struct TestApp {
    pub base: String,
    pub backend: Arc<Backend>,
    pub state: Arc<AppState>,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(&[]).await
}

pub async fn spawn_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let (backend_addr, backend) = spawn_backend().await;

    let mut env: HashMap<String, String> = HashMap::from([
        ("API_URL".to_string(), format!("http://{backend_addr}/api")),
        ("REQUEST_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    for (key, value) in overrides {
        env.insert(key.to_string(), value.to_string());
    }

    let config = Config::load(|key| env.get(key).cloned()).unwrap();
    let state = Arc::new(AppState::new(&config).unwrap());
    let addr = serve(AppRouter::build(state.clone())).await;

    let client = Client::builder().redirect(Policy::none()).build().unwrap();

    TestApp {
        base: format!("http://{addr}"),
        backend,
        state,
        client,
    }
}

pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn cookie_set_to(cookies: &[String], name: &str, value: &str) -> bool {
    let prefix = format!("{name}={value};");
    cookies.iter().any(|cookie| cookie.starts_with(&prefix))
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
