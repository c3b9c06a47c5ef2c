use crate::{
    domain::{resource::AdminResource, response::DashboardSummary},
    middleware::Identity,
    state::AppState,
};
use axum::{Extension, Json, extract::State};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use shared::{
    errors::{ErrorResponse, HttpError},
    model::{ListQuery, Paginated},
};
use std::{collections::BTreeMap, sync::Arc};
use tracing::warn;

const UNKNOWN_COUNTRY: &str = "Inconnu";

fn users_by_role(page: &Paginated<Value>) -> BTreeMap<String, u64> {
    let mut counts: BTreeMap<String, u64> = ["admin", "editor", "viewer"]
        .into_iter()
        .map(|role| (role.to_string(), 0))
        .collect();

    for user in &page.results {
        let role = user
            .get("role")
            .and_then(Value::as_str)
            .filter(|role| !role.is_empty())
            .unwrap_or("viewer");
        *counts.entry(role.to_string()).or_insert(0) += 1;
    }

    counts
}

fn games_by_country(page: &Paginated<Value>) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();

    for game in &page.results {
        let country = game
            .pointer("/country/name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY);
        *counts.entry(country.to_string()).or_insert(0) += 1;
    }

    counts
}

/// Keys are `YYYY-MM-DD`. A missing or unreadable `created_at` counts as `today`.
fn predictions_by_day(page: &Paginated<Value>, today: NaiveDate) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();

    for prediction in &page.results {
        let day = prediction
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|created| created.date_naive())
            .unwrap_or(today);
        *counts.entry(day.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
    }

    counts
}

#[utoipa::path(
    get,
    path = "/admin/api/dashboard",
    responses(
        (status = 200, description = "Entity counts", body = DashboardSummary),
        (status = 307, description = "No valid session, redirected to login"),
        (status = 503, description = "Backend unreachable", body = ErrorResponse)
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<DashboardSummary>, HttpError> {
    let api = &state.di_container.admin_api;
    let token = identity.access_token.as_str();
    let query = ListQuery::default();

    let (users, games, game_types, countries, predictions, results) = tokio::join!(
        api.list(AdminResource::Users, &query, token),
        api.list(AdminResource::Games, &query, token),
        api.list(AdminResource::GameTypes, &query, token),
        api.list(AdminResource::Countries, &query, token),
        api.list(AdminResource::Predictions, &query, token),
        api.list(AdminResource::Results, &query, token),
    );

    let users = users?;
    let games = games?;

    let predictions = predictions.unwrap_or_else(|e| {
        warn!("Predictions count unavailable: {e}");
        Paginated::default()
    });
    let results = results.unwrap_or_else(|e| {
        warn!("Results count unavailable: {e}");
        Paginated::default()
    });

    Ok(Json(DashboardSummary {
        users: users.count,
        games: games.count,
        game_types: game_types?.count,
        countries: countries?.count,
        predictions: predictions.count,
        results: results.count,
        users_by_role: users_by_role(&users),
        games_by_country: games_by_country(&games),
        predictions_by_day: predictions_by_day(&predictions, Utc::now().date_naive()),
    }))
}
