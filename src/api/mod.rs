//! REST API endpoints.
//!
//! Read-only JSON views over the loaded corpus for the dashboard front-end.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::dashboard::DashboardError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownJournee(_) | DashboardError::UnknownMatch { .. } => {
                ApiError::NotFound(err.to_string())
            }
            DashboardError::BadFilter(_) | DashboardError::Ranking(_) => {
                ApiError::BadRequest(err.to_string())
            }
        }
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if origin.trim() == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin.trim()) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Ignoring invalid CORS origin {:?}", origin);
            layer
        }
    }
}

/// Build the API router.
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/api/journees", get(routes::journees::list_journees))
        .route("/api/journees/:id/mvp", get(routes::journees::journee_mvp))
        .route("/api/journees/:id/overview", get(routes::journees::journee_overview))
        .route("/api/journees/:id/matches/:index", get(routes::journees::journee_match))
        .route("/api/statistics", get(routes::statistics::statistics))
        .route("/api/club/totals", get(routes::club::club_totals))
        .route("/api/club/evolution", get(routes::club::club_evolution))
        .route("/api/club/sets", get(routes::club::club_sets))
        .route("/api/players/:name/history", get(routes::players::player_history))
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
