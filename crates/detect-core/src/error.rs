//! Detection pipeline error types

use thiserror::Error;

/// Failures the detection pipeline can report.
///
/// A closed set: every variant folds into a `success: false` detection
/// report at the pipeline boundary, so callers can branch on the category
/// instead of parsing message text.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Malformed base64 payload, or bytes no image codec understands.
    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    /// The recognition model was never loaded at startup.
    #[error("Model not loaded. Position detection is unavailable.")]
    ModelNotLoaded,

    /// The model is loaded but inference did not produce a usable board.
    #[error("Recognition failed: {0}")]
    Recognition(String),
}
