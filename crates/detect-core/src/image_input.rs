//! Image ingestion: untrusted payload to a validated RGB pixel grid.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbImage;

use crate::error::DetectError;

/// Raw image payload as received from the transport layer.
pub enum ImagePayload {
    /// Raw image bytes, e.g. a multipart file upload.
    Bytes(Vec<u8>),
    /// Base64 text, optionally prefixed with a data-URL header
    /// (`data:image/png;base64,...`).
    Base64(String),
}

/// Decode a payload into an 8-bit RGB pixel grid.
///
/// Data-URL headers are stripped, not validated: everything up to the
/// first comma is discarded. Any source color mode (greyscale, RGBA,
/// palette) is converted to RGB before the image leaves this stage.
pub fn decode_payload(payload: ImagePayload) -> Result<RgbImage, DetectError> {
    let bytes = match payload {
        ImagePayload::Bytes(bytes) => bytes,
        ImagePayload::Base64(text) => {
            let body = match text.split_once(',') {
                Some((_header, body)) => body,
                None => text.as_str(),
            };
            STANDARD
                .decode(body.trim())
                .map_err(|e| DetectError::ImageDecode(format!("invalid base64: {e}")))?
        }
    };

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| DetectError::ImageDecode(format!("unreadable image bytes: {e}")))?;

    Ok(decoded.to_rgb8())
}
