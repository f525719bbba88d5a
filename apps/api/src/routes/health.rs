use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Returns a simple status object with service version and the analysis endpoint.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "resume-analyzer-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/analyze"]
    }))
}
