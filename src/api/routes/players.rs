use axum::extract::{Path, Query, State};
use axum::Json;

use super::FilterParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::MatchParticipation;

/// An unknown player yields an empty history, not an error.
pub async fn player_history(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<MatchParticipation>>, ApiError> {
    let filter = params.journee_filter()?;
    Ok(Json(state.dashboard.history_for(&name, &filter)?))
}
