use thiserror::Error;

/// Failure at the persistence boundary.
///
/// The core never produces errors of its own; validation rejections and lookup
/// misses degrade to no-ops. Only load and save can fail, and neither touches
/// in-memory state when it does.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Resume not found: {0}")]
    NotFound(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl GatewayError {
    /// True for failures worth surfacing as "could not reach the backend" rather
    /// than "the backend rejected the request".
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Http(_))
    }
}
