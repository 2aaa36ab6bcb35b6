//! GeoNames-style search client.

use serde::Deserialize;

use super::error::GeoError;

/// Default base URL for the geocoding API.
const DEFAULT_BASE_URL: &str = "http://api.geonames.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeoConfig {
    /// Account name sent as the `username` query parameter.
    pub username: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeoConfig {
    /// Create a new config with the given account name.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
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

/// A city resolved by the geocoding API.
#[derive(Debug, Clone, PartialEq)]
pub struct CityMatch {
    /// Canonical city name as reported upstream.
    pub city: String,
    /// ISO country code.
    pub country_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<i64>,
}

/// Wrapper for the search response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    geonames: Vec<GeoNameRow>,
}

/// Raw upstream row. Coordinates arrive as JSON strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoNameRow {
    name: String,
    country_code: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
    population: Option<i64>,
}

impl GeoNameRow {
    /// Rows without a country code cannot be used and are skipped.
    fn into_match(self) -> Option<CityMatch> {
        let country_code = self.country_code?;
        Some(CityMatch {
            city: self.name,
            country_code,
            latitude: self.lat.and_then(|raw| raw.parse().ok()),
            longitude: self.lng.and_then(|raw| raw.parse().ok()),
            population: self.population,
        })
    }
}

/// Client for the geocoding API.
#[derive(Debug, Clone)]
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
}

impl GeoClient {
    /// Create a new geocoding client.
    pub fn new(config: GeoConfig) -> Result<Self, GeoError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            username: config.username,
        })
    }

    /// Resolve a free-text place name to its best match.
    ///
    /// Returns `None` when the upstream has no result for the query.
    pub async fn validate_city(&self, query: &str) -> Result<Option<CityMatch>, GeoError> {
        let mut matches = self.search(query, 1).await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.remove(0)))
        }
    }

    /// Search for up to `max_rows` cities matching the query.
    pub async fn search(&self, query: &str, max_rows: u8) -> Result<Vec<CityMatch>, GeoError> {
        let url = format!("{}/searchJSON", self.base_url);
        let max_rows = max_rows.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("maxRows", max_rows.as_str()),
                ("username", self.username.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| GeoError::Json {
            message: e.to_string(),
        })?;

        Ok(parsed
            .geonames
            .into_iter()
            .filter_map(GeoNameRow::into_match)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeoConfig::new("demo");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_with_base_url() {
        let config = GeoConfig::new("demo").with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_creation() {
        let client = GeoClient::new(GeoConfig::new("demo"));
        assert!(client.is_ok());
    }

    #[test]
    fn parses_string_coordinates() {
        let body = r#"{
            "geonames": [
                {
                    "name": "Lisbon",
                    "countryCode": "PT",
                    "lat": "38.71667",
                    "lng": "-9.13333",
                    "population": 517802
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let matches: Vec<CityMatch> = parsed
            .geonames
            .into_iter()
            .filter_map(GeoNameRow::into_match)
            .collect();

        assert_eq!(
            matches,
            vec![CityMatch {
                city: "Lisbon".into(),
                country_code: "PT".into(),
                latitude: Some(38.71667),
                longitude: Some(-9.13333),
                population: Some(517_802),
            }]
        );
    }

    #[test]
    fn skips_rows_without_country_code() {
        let body = r#"{
            "geonames": [
                {"name": "Atlantis", "lat": "0.0", "lng": "0.0"},
                {"name": "Porto", "countryCode": "PT", "lat": "41.14961", "lng": "-8.61099"}
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let matches: Vec<CityMatch> = parsed
            .geonames
            .into_iter()
            .filter_map(GeoNameRow::into_match)
            .collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].city, "Porto");
    }

    #[test]
    fn empty_result_set() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"geonames": []}"#).unwrap();
        assert!(parsed.geonames.is_empty());
    }
}
