use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub users: u64,
    pub games: u64,
    pub game_types: u64,
    pub countries: u64,
    pub predictions: u64,
    pub results: u64,
    /// Counted over the first page of users; a missing role counts as `viewer`.
    pub users_by_role: BTreeMap<String, u64>,
    /// Games on the first page grouped by country name.
    pub games_by_country: BTreeMap<String, u64>,
    /// Predictions on the first page grouped by creation day (`YYYY-MM-DD`).
    pub predictions_by_day: BTreeMap<String, u64>,
}
