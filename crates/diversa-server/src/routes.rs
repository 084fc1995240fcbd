//! Route definitions.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use diversa_agent::Analyst;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `analyst` - The portfolio analyst
/// * `max_upload_bytes` - Upload size limit for the analyze endpoint
pub fn create_router(analyst: Arc<Analyst>, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState { analyst });

    Router::new()
        // Upload UI
        .route("/", get(handlers::index))
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Analysis
        .route("/api/v1/analyze", post(handlers::analyze))
        // State
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
