//! Places search HTTP client.

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use super::error::PlacesError;
use super::types::{Place, PlacesResponse};

/// Default base URL for the places API.
const DEFAULT_BASE_URL: &str = "https://places-api.foursquare.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Upstream category id for tourist attractions.
pub const ATTRACTIONS_CATEGORY: &str = "16000";

/// Configuration for the places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// Bearer key for the `Authorization` header.
    pub api_key: String,
    /// Value for the `X-Places-Api-Version` header.
    pub api_version: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a new config with the given key and version pin.
    pub fn new(api_key: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_version: api_version.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

/// Client for the places search API.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlacesClient {
    /// Create a new places client with auth headers installed.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(
            |_| PlacesError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            },
        )?;
        headers.insert(AUTHORIZATION, bearer);

        let version =
            HeaderValue::from_str(&config.api_version).map_err(|_| PlacesError::Api {
                status: 0,
                message: "Invalid API version format".to_string(),
            })?;
        headers.insert(HeaderName::from_static("x-places-api-version"), version);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// List points of interest near a city.
    ///
    /// `categories` is an upstream category id filter such as
    /// [`ATTRACTIONS_CATEGORY`]; `limit` is the maximum number of rows the
    /// upstream should return.
    pub async fn search(
        &self,
        near: &str,
        categories: &str,
        limit: u32,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = format!("{}/places/search", self.base_url);
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("near", near),
                ("categories", categories),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PlacesError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: PlacesResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(parsed.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PlacesConfig::new("test-key", "2025-06-17");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_with_base_url() {
        let config =
            PlacesConfig::new("test-key", "2025-06-17").with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_creation() {
        let client = PlacesClient::new(PlacesConfig::new("test-key", "2025-06-17"));
        assert!(client.is_ok());
    }
}
