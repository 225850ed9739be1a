//! Client for the external engine evaluation API (chess-api.com).

use axum::http::StatusCode;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::AppError;

pub struct ChessApiClient {
    client: Client,
    base_url: String,
}

/// Engine reply reshaped for our clients.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub fen: String,
    pub evaluation: Option<f64>,
    pub best_move: Option<String>,
    pub best_move_san: Option<String>,
    pub continuation: Vec<String>,
    pub is_mate: bool,
    pub mate_in: Option<i64>,
    pub depth: Option<i64>,
    pub win_chance: Option<f64>,
}

impl ChessApiClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent("OtbChess/1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        Self {
            client,
            base_url: config.chess_api_url.clone(),
        }
    }

    /// Evaluate `fen` at the requested search depth.
    pub async fn analyze(&self, fen: &str, depth: u32) -> Result<AnalysisResponse, AppError> {
        let resp = self
            .client
            .post(&self.base_url)
            .json(&json!({ "fen": fen, "depth": depth }))
            .send()
            .await
            .map_err(|e| AppError::Unavailable(format!("Failed to connect to chess API: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let status = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
            return Err(AppError::Upstream(status, format!("Chess API error: {body}")));
        }

        let data: Value = resp
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Chess API JSON parse error: {e}")))?;

        // A mate score replaces the centipawn evaluation entirely.
        let mate_in = data.get("mate").and_then(Value::as_i64);

        Ok(AnalysisResponse {
            fen: fen.to_string(),
            evaluation: if mate_in.is_some() {
                None
            } else {
                data.get("eval").and_then(Value::as_f64)
            },
            best_move: data
                .get("move")
                .and_then(Value::as_str)
                .map(str::to_string),
            best_move_san: data.get("san").and_then(Value::as_str).map(str::to_string),
            continuation: data
                .get("continuationArr")
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default(),
            is_mate: mate_in.is_some(),
            mate_in,
            depth: data.get("depth").and_then(Value::as_i64),
            win_chance: data.get("winChance").and_then(Value::as_f64),
        })
    }
}
