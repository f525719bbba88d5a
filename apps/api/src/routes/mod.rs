pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes();

    Router::new()
        .route("/", get(ui::index))
        .route("/static/app.js", get(ui::app_js))
        .route("/static/style.css", get(ui::style_css))
        .route("/health", get(health::health_handler))
        .route("/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}
