//! Detection pipeline: payload in, structured detection report out.

use serde::Serialize;

use crate::error::DetectError;
use crate::image_input::{self, ImagePayload};
use crate::position::{self, PositionRecord};
use crate::recognize::Recognize;
use crate::turn;

/// Base URL for the board-editor link attached to successful detections.
pub const LICHESS_EDITOR_URL: &str = "https://lichess.org/editor";

/// Outward-facing detection result. Exactly one of two shapes occurs:
/// success with the position fields populated, or failure with `error`
/// set and the position fields absent. An invalid-but-decoded position
/// is still a success (`is_valid: false`), editor link included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_fen: Option<String>,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lichess_url: Option<String>,
}

impl DetectionReport {
    fn success(record: PositionRecord) -> Self {
        let lichess_url = format!("{LICHESS_EDITOR_URL}/{}", record.board_fen);
        Self {
            success: true,
            fen: Some(record.fen),
            board_fen: Some(record.board_fen),
            is_valid: record.is_valid,
            error: None,
            lichess_url: Some(lichess_url),
        }
    }

    fn failure(err: &DetectError) -> Self {
        Self {
            success: false,
            fen: None,
            board_fen: None,
            is_valid: false,
            error: Some(err.to_string()),
            lichess_url: None,
        }
    }
}

/// The position-detection pipeline around a once-loaded recognizer.
///
/// `recognizer` is `None` when model loading failed at startup; every
/// detection then reports the model as unavailable without touching the
/// payload. There is no lazy loading later.
pub struct Detector<R> {
    recognizer: Option<R>,
}

impl<R: Recognize> Detector<R> {
    pub fn new(recognizer: Option<R>) -> Self {
        Self { recognizer }
    }

    pub fn model_loaded(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Run the full pipeline. Never fails outward: every stage error is
    /// folded into a `success: false` report.
    pub fn detect(&self, payload: ImagePayload, turn_hint: &str) -> DetectionReport {
        match self.run(payload, turn_hint) {
            Ok(report) => report,
            Err(err) => {
                tracing::debug!(error = %err, "detection failed");
                DetectionReport::failure(&err)
            }
        }
    }

    fn run(&self, payload: ImagePayload, turn_hint: &str) -> Result<DetectionReport, DetectError> {
        // Availability first: a missing model must not be masked by an
        // unrelated decode error.
        let recognizer = self.recognizer.as_ref().ok_or(DetectError::ModelNotLoaded)?;

        let image = image_input::decode_payload(payload)?;
        let turn = turn::resolve(turn_hint);

        let recognition = recognizer
            .predict(&image, turn)
            .map_err(|e| DetectError::Recognition(e.to_string()))?;
        tracing::debug!(corners = ?recognition.corners, "board located");

        Ok(DetectionReport::success(position::encode(
            &recognition.board,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::ObservedBoard;
    use crate::recognize::{BoardCorners, Recognition, RecognizeError};
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use image::{ImageFormat, Rgb, RgbImage};
    use shakmaty::{Board, Color};
    use std::io::Cursor;

    struct StartBoard;

    impl Recognize for StartBoard {
        fn predict(&self, _image: &RgbImage, turn: Color) -> Result<Recognition, RecognizeError> {
            Ok(Recognition {
                board: ObservedBoard::new(Board::default(), turn),
                corners: BoardCorners([[0.0, 0.0], [64.0, 0.0], [64.0, 64.0], [0.0, 64.0]]),
            })
        }
    }

    struct Broken;

    impl Recognize for Broken {
        fn predict(&self, _image: &RgbImage, _turn: Color) -> Result<Recognition, RecognizeError> {
            Err(RecognizeError::Inference("no board found in image".into()))
        }
    }

    fn png_base64() -> String {
        let img = RgbImage::from_pixel(8, 8, Rgb([200, 180, 140]));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        STANDARD.encode(&buf)
    }

    #[test]
    fn test_successful_detection() {
        let detector = Detector::new(Some(StartBoard));
        let report = detector.detect(ImagePayload::Base64(png_base64()), "white");

        assert!(report.success);
        assert!(report.is_valid);
        assert_eq!(
            report.board_fen.as_deref(),
            Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
        );
        assert!(report.error.is_none());
    }

    #[test]
    fn test_lichess_url_derived_from_board_fen() {
        let detector = Detector::new(Some(StartBoard));
        let report = detector.detect(ImagePayload::Base64(png_base64()), "white");

        let board_fen = report.board_fen.unwrap();
        assert_eq!(
            report.lichess_url.as_deref(),
            Some(format!("{LICHESS_EDITOR_URL}/{board_fen}").as_str())
        );
        assert!(report.fen.unwrap().starts_with(&board_fen));
    }

    #[test]
    fn test_decode_failure_becomes_report() {
        let detector = Detector::new(Some(StartBoard));
        let report = detector.detect(ImagePayload::Base64("not-base64!!".into()), "white");

        assert!(!report.success);
        assert!(!report.is_valid);
        assert!(report.fen.is_none());
        assert!(report.board_fen.is_none());
        assert!(report.lichess_url.is_none());
        assert!(report.error.unwrap().to_lowercase().contains("decode"));
    }

    #[test]
    fn test_missing_model_wins_over_bad_payload() {
        let detector = Detector::<StartBoard>::new(None);

        // Even a payload that could never decode must report the model
        // as unavailable, not a decode failure.
        let report = detector.detect(ImagePayload::Base64("not-base64!!".into()), "white");
        assert!(!report.success);
        assert!(report.error.unwrap().contains("Model not loaded"));

        let report = detector.detect(ImagePayload::Base64(png_base64()), "white");
        assert!(report.error.unwrap().contains("Model not loaded"));
    }

    #[test]
    fn test_recognizer_failure_keeps_its_message() {
        let detector = Detector::new(Some(Broken));
        let report = detector.detect(ImagePayload::Base64(png_base64()), "white");

        assert!(!report.success);
        let error = report.error.unwrap();
        assert!(error.contains("Recognition failed"));
        assert!(error.contains("no board found in image"));
    }

    #[test]
    fn test_turn_hint_reaches_the_fen() {
        let detector = Detector::new(Some(StartBoard));
        let report = detector.detect(ImagePayload::Base64(png_base64()), "black");
        assert!(report.fen.unwrap().contains(" b "));
    }

    #[test]
    fn test_failure_report_omits_position_fields_in_json() {
        let detector = Detector::<StartBoard>::new(None);
        let report = detector.detect(ImagePayload::Base64(png_base64()), "white");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("fen").is_none());
        assert!(json.get("board_fen").is_none());
        assert!(json.get("lichess_url").is_none());
        assert!(json["error"].is_string());
    }
}
