pub mod clients;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use clients::vision::VisionClient;

/// Process-wide detector handle, loaded once at startup and shared
/// read-only across requests.
pub type SharedDetector = Arc<detect_core::Detector<VisionClient>>;
