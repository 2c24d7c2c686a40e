//! Statistics endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, models::stats::TravelStats};

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/visitedplaces/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Travel statistics", body = TravelStats)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<TravelStats>> {
    let stats = state.services.stats.travel_stats().await?;
    Ok(Json(stats))
}
