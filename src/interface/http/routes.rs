use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::application::AverageService;

use super::handlers::{health_handler, numbers_handler, AppState};

pub fn create_router(average_service: Arc<AverageService>) -> Router {
    let state = AppState { average_service };

    Router::new()
        .route("/health", get(health_handler))
        .route("/numbers/{number_id}", get(numbers_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
