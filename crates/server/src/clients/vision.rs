//! Client for the board-recognition sidecar.
//!
//! The sidecar runs the vision model and answers one JSON request per
//! image; this client is the only place that talks to it. The HTTP calls
//! block on purpose: recognition is CPU-bound on the sidecar and the
//! whole pipeline runs on blocking threads behind the [`Recognize`]
//! trait.

use std::io::Cursor;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use detect_core::{BoardCorners, ObservedBoard, Recognition, Recognize, RecognizeError};
use image::RgbImage;
use serde::Deserialize;
use shakmaty::fen::Fen;
use shakmaty::Color;

use crate::config::Config;

pub struct VisionClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct PredictResponse {
    board_fen: String,
    corners: [[f32; 2]; 4],
}

impl VisionClient {
    /// Build the client, or `None` when no sidecar is configured. There
    /// is no lazy loading later: an unconfigured model stays unavailable
    /// for the life of the process.
    pub fn new(config: &Config) -> Option<Self> {
        let base_url = config.vision_url.clone()?;
        let http = reqwest::blocking::Client::builder()
            .user_agent("OtbChess/1.0")
            .timeout(Duration::from_secs(config.vision_timeout_secs))
            .build()
            .ok()?;
        Some(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Recognize for VisionClient {
    fn predict(&self, image: &RgbImage, turn: Color) -> Result<Recognition, RecognizeError> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| RecognizeError::Inference(format!("image re-encode error: {e}")))?;

        let turn_str = match turn {
            Color::White => "white",
            Color::Black => "black",
        };

        let resp = self
            .http
            .post(format!("{}/predict", self.base_url))
            .json(&serde_json::json!({
                "image": STANDARD.encode(&png),
                "turn": turn_str,
            }))
            .send()
            .map_err(|e| RecognizeError::Inference(format!("model request error: {e}")))?;

        if !resp.status().is_success() {
            return Err(RecognizeError::Inference(format!(
                "model HTTP {}",
                resp.status()
            )));
        }

        let parsed: PredictResponse = resp
            .json()
            .map_err(|e| RecognizeError::BadOutput(format!("model reply parse error: {e}")))?;

        // The sidecar reports piece placement only; side to move comes
        // from the caller's hint.
        let fen: Fen = format!("{} w - - 0 1", parsed.board_fen)
            .parse()
            .map_err(|e| RecognizeError::BadOutput(format!("bad board fen from model: {e}")))?;
        let board = fen.into_setup().board;

        Ok(Recognition {
            board: ObservedBoard::new(board, turn),
            corners: BoardCorners(parsed.corners),
        })
    }
}
