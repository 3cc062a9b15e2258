//! Axum router — maps all URL paths to handlers.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::handlers::{
    assets::stylesheet,
    panel::{apply_form, generate_api_url, panel_page, select_preset, solve},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/",              get(panel_page))
        .route("/form",          post(apply_form))
        .route("/solve",         post(solve))
        .route("/api-url",       post(generate_api_url))
        .route("/preset/{id}",   post(select_preset))
        .route("/static/panel.css", get(stylesheet))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
