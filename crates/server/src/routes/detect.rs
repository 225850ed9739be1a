use axum::{extract::Multipart, Extension, Json};
use detect_core::{DetectionReport, ImagePayload};
use serde::Deserialize;

use crate::error::AppError;
use crate::SharedDetector;

#[derive(Deserialize)]
pub struct Base64ImageRequest {
    pub image: String,
    #[serde(default = "default_turn")]
    pub turn: String,
}

fn default_turn() -> String {
    "white".to_string()
}

/// POST /detect/base64
/// Detect a position from a base64-encoded image (data-URL prefix allowed).
pub async fn detect_from_base64(
    Extension(detector): Extension<SharedDetector>,
    Json(req): Json<Base64ImageRequest>,
) -> Result<Json<DetectionReport>, AppError> {
    run_detection(detector, ImagePayload::Base64(req.image), req.turn).await
}

/// POST /detect
/// Detect a position from a multipart upload: a `file` part with the
/// image bytes and an optional `turn` part.
pub async fn detect_from_upload(
    Extension(detector): Extension<SharedDetector>,
    mut multipart: Multipart,
) -> Result<Json<DetectionReport>, AppError> {
    let mut file: Option<Vec<u8>> = None;
    let mut turn = default_turn();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                file = Some(bytes.to_vec());
            }
            Some("turn") => {
                turn = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read turn field: {e}")))?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;
    run_detection(detector, ImagePayload::Bytes(file), turn).await
}

/// Recognition blocks on CPU-bound inference, so the whole pipeline runs
/// on a blocking thread. Domain failures come back inside the report;
/// only a crashed task is a transport error.
async fn run_detection(
    detector: SharedDetector,
    payload: ImagePayload,
    turn: String,
) -> Result<Json<DetectionReport>, AppError> {
    let report = tokio::task::spawn_blocking(move || detector.detect(payload, &turn))
        .await
        .map_err(|e| AppError::Internal(format!("Detection task failed: {e}")))?;
    Ok(Json(report))
}
