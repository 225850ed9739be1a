use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the board-recognition sidecar. Detection stays
    /// disabled for the life of the process when unset.
    pub vision_url: Option<String>,
    /// Timeout for one recognition call, in seconds.
    pub vision_timeout_secs: u64,
    /// External engine evaluation endpoint.
    pub chess_api_url: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            vision_url: env::var("VISION_URL").ok().filter(|v| !v.is_empty()),
            vision_timeout_secs: env::var("VISION_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            chess_api_url: env::var("CHESS_API_URL")
                .unwrap_or_else(|_| "https://chess-api.com/v1".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }
}
