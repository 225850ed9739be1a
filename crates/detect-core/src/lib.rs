//! Position detection core: image ingestion, side-to-move resolution,
//! recognition adapter, position encoding and legality classification.
//!
//! The transport layer hands in an untrusted image payload and a turn
//! hint; this crate hands back a structured [`DetectionReport`]. The
//! external board-vision model is consumed only through the
//! [`Recognize`] trait, loaded once at startup and never reloaded.

pub mod error;
pub mod image_input;
pub mod pipeline;
pub mod position;
pub mod recognize;
pub mod turn;

pub use error::DetectError;
pub use image_input::ImagePayload;
pub use pipeline::{DetectionReport, Detector, LICHESS_EDITOR_URL};
pub use position::{encode, ObservedBoard, PositionRecord};
pub use recognize::{BoardCorners, Recognition, Recognize, RecognizeError};
