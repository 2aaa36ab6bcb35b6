//! Managed-backend error types.

/// Errors from the auth and row-storage clients.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error status
    #[error("backend error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Row lookup matched nothing
    #[error("not found")]
    NotFound,

    /// Bearer token rejected by the auth service
    #[error("invalid credentials")]
    Unauthorized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::Api {
            status: 409,
            message: "duplicate key".into(),
        };
        assert_eq!(err.to_string(), "backend error 409: duplicate key");

        assert_eq!(StoreError::NotFound.to_string(), "not found");
        assert_eq!(StoreError::Unauthorized.to_string(), "invalid credentials");
    }
}
