//! Environment-driven configuration. The browser original picked up the
//! endpoint and CSRF token from the hosting page; here they come from a
//! `.env` file or the process environment instead.

/// Backend used when `SUNO_BASE_URL` is not set; matches the Django dev
/// server default.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Sent as the `X-CSRFToken` header when present. The save view accepts
    /// requests without it, so an unset token is not an error.
    pub csrf_token: Option<String>,
}

/// Load configuration from `.env` (if present) and the environment.
pub fn load_config() -> Config {
    dotenv::dotenv().ok();
    let base_url =
        std::env::var("SUNO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let csrf_token = std::env::var("SUNO_CSRF_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty());
    Config {
        base_url,
        csrf_token,
    }
}
