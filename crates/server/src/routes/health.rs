use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::SharedDetector;

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "OTB Chess Analyzer API", "status": "running" }))
}

/// GET /health
pub async fn health_check(Extension(detector): Extension<SharedDetector>) -> Json<Value> {
    Json(json!({ "status": "healthy", "model_loaded": detector.model_loaded() }))
}
