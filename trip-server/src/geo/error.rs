//! Geocoding client error types.

/// Errors that can occur when querying the geocoding API.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("geocoding API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeoError::Api {
            status: 503,
            message: "over quota".into(),
        };
        assert_eq!(err.to_string(), "geocoding API error 503: over quota");

        let err = GeoError::Json {
            message: "expected value".into(),
        };
        assert!(err.to_string().contains("JSON parse error"));
    }
}
