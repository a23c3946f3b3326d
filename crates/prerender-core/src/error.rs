use thiserror::Error;

/// Error types shared across the prerender crates.
#[derive(Error, Debug)]
pub enum PrerenderError {
    /// Invalid configuration (bad allow/deny pattern, malformed service URL).
    /// Raised at construction time, never per request.
    #[error("Config error: {0}")]
    ConfigError(String),

    /// Upstream fetch exceeded its deadline.
    #[error("Upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection-level failure reaching the rendering service.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Any other transport failure (bad URL, body read failure, ...).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// A user-supplied render hook failed.
    #[error("Hook error: {0}")]
    HookError(String),

    /// Inbound request could not be projected into a `RequestView`.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl PrerenderError {
    /// Returns true if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PrerenderError::Timeout(_) | PrerenderError::NetworkError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PrerenderError::Timeout(30).is_retryable());
        assert!(PrerenderError::NetworkError("connection reset".into()).is_retryable());
        assert!(!PrerenderError::ConfigError("bad pattern".into()).is_retryable());
        assert!(!PrerenderError::HookError("cache write failed".into()).is_retryable());
    }
}
