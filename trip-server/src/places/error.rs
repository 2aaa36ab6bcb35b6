//! Places client error types.

use std::fmt;

/// Errors from the places HTTP client.
#[derive(Debug)]
pub enum PlacesError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl fmt::Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacesError::Http(e) => write!(f, "HTTP error: {e}"),
            PlacesError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            PlacesError::Api { status, message } => {
                write!(f, "places API error {status}: {message}")
            }
            PlacesError::Unauthorized => write!(f, "unauthorized (invalid places API key)"),
        }
    }
}

impl std::error::Error for PlacesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlacesError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlacesError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized (invalid places API key)");

        let err = PlacesError::Api {
            status: 429,
            message: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "places API error 429: quota exceeded");

        let err = PlacesError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected string"));
    }
}
