//! Contract with the external board-recognition model.

use image::RgbImage;
use shakmaty::Color;
use thiserror::Error;

use crate::position::ObservedBoard;

/// Pixel coordinates of the four detected board corners, kept for
/// diagnostics only; they are not part of the outward contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardCorners(pub [[f32; 2]; 4]);

/// What the recognizer reports for one image.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub board: ObservedBoard,
    pub corners: BoardCorners,
}

/// Errors the recognizer itself can report. A missing model is not one
/// of them: availability is decided before the recognizer is called.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// Inference ran but failed (no board found, model crashed, ...).
    #[error("inference failed: {0}")]
    Inference(String),

    /// Inference produced output the pipeline cannot use.
    #[error("model output unusable: {0}")]
    BadOutput(String),
}

/// A loaded board-recognition model.
///
/// Implementations may block on CPU-bound inference; callers on an async
/// runtime are expected to run detection on a blocking thread.
pub trait Recognize: Send + Sync {
    fn predict(&self, image: &RgbImage, turn: Color) -> Result<Recognition, RecognizeError>;
}
