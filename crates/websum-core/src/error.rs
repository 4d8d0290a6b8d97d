use thiserror::Error;

/// Application-wide error types for websum.
///
/// Inside the pipeline every stage returns `Result<_, AppError>`. The
/// [`Summarizer`](crate::summarize::Summarizer) renders these into plain
/// strings at its boundary, so callers of the pipeline never see them.
#[derive(Error, Debug)]
pub enum AppError {
    /// The URL does not use an http:// or https:// scheme.
    #[error("Invalid URL '{0}': only http:// and https:// URLs are supported")]
    InvalidUrl(String),

    /// Fetching a page failed (transport error or non-2xx status).
    #[error("Failed to fetch URL {url}: {cause}")]
    Fetch { url: String, cause: String },

    /// Startup configuration is unusable (credential shape, client setup).
    #[error("{0}")]
    Config(String),

    /// Model API call failed.
    #[error("LLM error (HTTP {status_code}): {message}")]
    Llm { message: String, status_code: u16 },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// HTTP request failed for a reason other than connect/timeout.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The local model is not installed and could not be pulled.
    #[error(
        "Could not pull {model} model ({reason}). Please ensure Ollama is running and you have internet access"
    )]
    ModelUnavailable { model: String, reason: String },

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Build a [`AppError::Fetch`] for `url`.
    pub fn fetch(url: &str, cause: impl Into<String>) -> Self {
        AppError::Fetch {
            url: url.to_string(),
            cause: cause.into(),
        }
    }
}
