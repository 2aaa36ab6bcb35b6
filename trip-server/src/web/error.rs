//! Client-facing error type.

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::geo::GeoError;
use crate::places::PlacesError;
use crate::planner::ItineraryError;
use crate::store::StoreError;

/// Application error type.
///
/// Everything a handler can fail with collapses into one of four cases; the
/// response body carries the raw message with no further structure. A
/// resource that exists but belongs to someone else is reported as
/// `NotFound`, never as forbidden.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("Invalid authentication credentials")]
    Unauthorized,

    #[error("{message}")]
    NotFound { message: String },

    /// Upstream service failure (auth, store, geocoding, places).
    #[error("{message}")]
    Upstream { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        tracing::error!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });

        if matches!(self, ApiError::Unauthorized) {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::not_found("not found"),
            StoreError::Unauthorized => ApiError::Unauthorized,
            other => ApiError::Upstream {
                message: other.to_string(),
            },
        }
    }
}

impl From<GeoError> for ApiError {
    fn from(err: GeoError) -> Self {
        ApiError::Upstream {
            message: err.to_string(),
        }
    }
}

impl From<PlacesError> for ApiError {
    fn from(err: PlacesError) -> Self {
        ApiError::Upstream {
            message: err.to_string(),
        }
    }
}

impl From<ItineraryError> for ApiError {
    fn from(err: ItineraryError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::bad_request("nope").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("gone").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Upstream {
                message: "timeout".into()
            }
            .into_response()
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthorized_carries_challenge_header() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn store_absence_maps_to_not_found() {
        let err = ApiError::from(StoreError::NotFound);
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn upstream_failures_keep_their_message() {
        let err = ApiError::from(GeoError::Api {
            status: 502,
            message: "bad gateway".into(),
        });
        assert_eq!(err.to_string(), "geocoding API error 502: bad gateway");
    }
}
