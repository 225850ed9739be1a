use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use server::clients::chess_api::ChessApiClient;
use server::clients::vision::VisionClient;
use server::{config, routes, SharedDetector};

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env();

    // Build the recognizer off the async runtime: its HTTP client is
    // blocking, as is every later recognition call.
    let vision = {
        let config = config.clone();
        tokio::task::spawn_blocking(move || VisionClient::new(&config))
            .await
            .expect("Failed to initialize vision client")
    };
    match &vision {
        Some(client) => tracing::info!("Vision model configured at {}", client.base_url()),
        None => tracing::warn!("VISION_URL not set - position detection disabled"),
    }
    let detector: SharedDetector = Arc::new(detect_core::Detector::new(vision));

    let engine = Arc::new(ChessApiClient::new(&config));

    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router — same paths the mobile client already uses
    let app = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/detect", post(routes::detect::detect_from_upload))
        .route("/detect/base64", post(routes::detect::detect_from_base64))
        .route("/analyze", post(routes::analyze::analyze_position))
        // Shared state
        .layer(Extension(detector))
        .layer(Extension(engine))
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}
