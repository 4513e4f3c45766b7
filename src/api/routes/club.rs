use axum::extract::{Query, State};
use axum::Json;

use super::FilterParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ClubTotals, EvolutionPoint, SetDistribution};

pub async fn club_totals(State(state): State<AppState>) -> Json<ClubTotals> {
    Json(state.dashboard.club_totals())
}

pub async fn club_evolution(State(state): State<AppState>) -> Json<Vec<EvolutionPoint>> {
    Json(state.dashboard.evolution_series())
}

pub async fn club_sets(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<SetDistribution>, ApiError> {
    let filter = params.journee_filter()?;
    Ok(Json(state.dashboard.set_distribution(&filter)?))
}
