mod common;

use common::{cookie_set_to, location, set_cookies, spawn_app};
use reqwest::{StatusCode, header::COOKIE};
use serde_json::{Value, json};
use shared::utils::GateOutcome;

#[tokio::test]
async fn request_without_cookie_redirects_without_backend_call() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/admin/dashboard"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));
    assert_eq!(app.backend.me_calls(), 0);
    assert_eq!(
        app.state.gate_metrics.count(GateOutcome::RedirectMissingToken),
        1
    );
}

#[tokio::test]
async fn login_page_is_reachable_without_session() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/admin/login")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("name=\"username\""));
    assert_eq!(app.backend.me_calls(), 0);
}

#[tokio::test]
async fn editor_cookie_passes_with_full_chrome() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/admin/games"))
        .header(COOKIE, "accessToken=acc-editor; refreshToken=ref-editor")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());

    let html = response.text().await.unwrap();
    assert!(html.contains("class=\"sidebar\""));
    assert!(html.contains("href=\"/admin/games/create\""));
    assert_eq!(app.backend.me_calls(), 1);
    assert_eq!(app.backend.refresh_calls(), 0);
}

#[tokio::test]
async fn expired_access_token_is_refreshed_once_and_cookie_replaced() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/admin/dashboard"))
        .header(COOKIE, "accessToken=acc-stale; refreshToken=ref-editor")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie_set_to(
        &set_cookies(&response),
        "accessToken",
        "acc-editor-2"
    ));
    assert_eq!(app.backend.refresh_calls(), 1);
    assert_eq!(app.backend.me_calls(), 2);
}

#[tokio::test]
async fn rejected_refresh_redirects_and_clears_cookies() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/admin/dashboard"))
        .header(COOKIE, "accessToken=acc-stale; refreshToken=ref-unknown")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response).as_deref(), Some("/admin/login"));

    let cookies = set_cookies(&response);
    assert!(cookie_set_to(&cookies, "accessToken", ""));
    assert!(cookie_set_to(&cookies, "refreshToken", ""));
    assert_eq!(app.backend.refresh_calls(), 1);
}

#[tokio::test]
async fn viewer_is_read_only_on_allowed_pages() {
    let app = spawn_app().await;
    let cookie = "accessToken=acc-viewer; refreshToken=ref-viewer";

    let response = app
        .client
        .get(app.url("/admin/results"))
        .header(COOKIE, cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("read-only-banner"));
    assert!(!html.contains("/admin/results/create"));

    let response = app
        .client
        .get(app.url("/admin/users"))
        .header(COOKIE, cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    let response = app
        .client
        .post(app.url("/admin/api/results"))
        .header(COOKIE, cookie)
        .json(&json!({ "name": "Final" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn dashboard_counts_tolerate_missing_predictions() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/admin/api/dashboard"))
        .header(COOKIE, "accessToken=acc-admin")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["users"], 3);
    assert_eq!(body["games"], 12);
    assert_eq!(body["predictions"], 0);
    assert_eq!(body["results"], 9);
    assert_eq!(body["users_by_role"]["viewer"], 1);
}

#[tokio::test]
async fn backend_validation_error_surfaces_first_field_message() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/admin/api/games"))
        .header(COOKIE, "accessToken=acc-editor")
        .json(&json!({ "country": 3 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "This field is required.");

    let response = app
        .client
        .post(app.url("/admin/api/games"))
        .header(COOKIE, "accessToken=acc-editor")
        .json(&json!({ "name": "Derby" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], 42);
}

#[tokio::test]
async fn public_catalogue_needs_no_session() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/client/game-types/slug/football"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Football");

    let response = app
        .client
        .get(app.url("/api/client/game-types/slug/curling"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.backend.me_calls(), 0);
}
