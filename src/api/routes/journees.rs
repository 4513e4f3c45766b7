use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::dashboard::JourneeInfo;
use crate::models::{JourneeId, JourneeOverview, MatchDetail, RankingEntry};

pub async fn list_journees(State(state): State<AppState>) -> Json<Vec<JourneeInfo>> {
    Json(state.dashboard.journees())
}

pub async fn journee_mvp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let id = JourneeId::new(id);
    Ok(Json(state.dashboard.mvp_and_top3_for(&id)?))
}

pub async fn journee_overview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JourneeOverview>, ApiError> {
    let id = JourneeId::new(id);
    Ok(Json(state.dashboard.journee_overview(&id)?))
}

pub async fn journee_match(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<MatchDetail>, ApiError> {
    let id = JourneeId::new(id);
    Ok(Json(state.dashboard.match_detail(&id, index)?))
}
