//! Error types for the docgate core.
//!
//! [`GatewayError`] carries the three failure classes a request or startup can
//! hit. The HTTP layer maps each variant onto a status code through
//! [`GatewayError::status_code`]; nothing is retried locally.

/// Core error type for docgate.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Required configuration is missing or malformed. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// No index document exists, or the requested object does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The blob store failed for any reason other than a missing object.
    #[error("backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

impl GatewayError {
    /// Build a [`GatewayError::NotFound`] from any displayable message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Build a [`GatewayError::Backend`] from any error type.
    #[must_use]
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// HTTP status code this error is surfaced as.
    #[must_use]
    pub fn status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound(_) => http::StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Backend(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable code used in error response bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "ConfigurationError",
            Self::NotFound(_) => "NotFound",
            Self::Backend(_) => "InternalError",
        }
    }
}

/// Convenience result type for docgate operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
