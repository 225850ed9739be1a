use std::sync::Arc;

use axum::{Extension, Json};
use serde::Deserialize;

use crate::clients::chess_api::{AnalysisResponse, ChessApiClient};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct AnalysisRequest {
    pub fen: String,
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    12
}

/// POST /analyze
/// Forward a position to the external engine and reshape its reply.
pub async fn analyze_position(
    Extension(engine): Extension<Arc<ChessApiClient>>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let analysis = engine.analyze(&req.fen, req.depth).await?;
    Ok(Json(analysis))
}
