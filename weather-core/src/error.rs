use thiserror::Error;

/// Error kinds surfaced to tool callers.
///
/// Nothing here is retried or recovered locally; every variant propagates
/// straight to the caller as a descriptive message.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "No API key provided. Pass `api_key` or set the {} environment variable.",
        crate::config::API_KEY_ENV
    )]
    MissingApiKey,

    #[error("Location not found: '{0}'")]
    LocationNotFound(String),

    #[error("Upstream rejected the API key (HTTP {0})")]
    Auth(u16),

    #[error("Upstream rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("Upstream weather service unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}
