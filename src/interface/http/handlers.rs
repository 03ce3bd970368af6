use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::application::{AverageError, AverageService};
use crate::domain::WindowReport;

/// Error surfaced to HTTP clients as `{"detail": ...}`
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

impl From<AverageError> for AppError {
    fn from(err: AverageError) -> Self {
        let status = match &err {
            AverageError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            AverageError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        };
        AppError {
            status,
            detail: err.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub average_service: Arc<AverageService>,
}

/// Query params for /numbers/{number_id}
#[derive(Debug, Deserialize)]
pub struct NumbersQuery {
    #[serde(default)]
    pub use_mock: bool,
}

/// Handler for GET /health
pub async fn health_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "numavg"
        })),
    )
}

/// Handler for GET /numbers/{number_id}
pub async fn numbers_handler(
    State(state): State<AppState>,
    Path(number_id): Path<String>,
    Query(params): Query<NumbersQuery>,
) -> Result<Json<WindowReport>, AppError> {
    let report = state
        .average_service
        .handle(&number_id, params.use_mock)
        .await?;
    Ok(Json(report))
}
