use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::dashboard::JourneeFilter;
use crate::models::RankingEntry;

#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    pub filter: Option<String>,
    /// Column to re-sort by, e.g. `sets.ratio`
    pub sort: Option<String>,
    pub direction: Option<String>,
}

/// Leaderboard, optionally re-sorted by a column (descending by default).
pub async fn statistics(
    State(state): State<AppState>,
    Query(params): Query<StatisticsParams>,
) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let filter: JourneeFilter = params.filter.as_deref().unwrap_or_default().parse()?;
    let entries = state.dashboard.statistics_for(&filter)?;

    let entries = match params.sort.as_deref() {
        Some(column) if !column.trim().is_empty() => state.dashboard.sort_by(
            &entries,
            column.trim(),
            params.direction.as_deref().unwrap_or("desc"),
        )?,
        _ => entries,
    };

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{get_json, test_app};
    use axum::http::StatusCode;
    use serde_json::Value;

    fn names(json: &Value) -> Vec<&str> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_all_time_statistics() {
        let (status, json) = get_json(test_app(), "/api/statistics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&json), vec!["Jean DUPONT", "Anne DURAND"]);
        assert_eq!(json[0]["matches"]["win_rate"], 80);
    }

    #[tokio::test]
    async fn test_journee_statistics() {
        let (status, json) = get_json(test_app(), "/api/statistics?filter=J3_20251012").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&json), vec!["Anne DURAND", "Jean DUPONT"]);
        assert_eq!(json[0]["matches"]["total"], 1.5);
        assert_eq!(json[0]["matches"]["win_rate"], 67);
    }

    #[tokio::test]
    async fn test_sorted_statistics_keep_rank() {
        let (status, json) = get_json(
            test_app(),
            "/api/statistics?sort=official_points&direction=asc",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&json), vec!["Anne DURAND", "Jean DUPONT"]);
        assert_eq!(json[0]["rank"], 2);
    }

    #[tokio::test]
    async fn test_bad_direction() {
        let (status, json) = get_json(test_app(), "/api/statistics?sort=name&direction=up").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_bad_filter() {
        let (status, _) = get_json(test_app(), "/api/statistics?filter=J3%2F..").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
