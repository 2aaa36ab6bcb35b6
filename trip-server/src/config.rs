//! Process configuration.
//!
//! Every setting is read once at startup into an immutable [`AppConfig`]
//! that is passed to the collaborators that need it. Nothing reads the
//! environment after this point.

use std::env;
use std::net::SocketAddr;

/// Default bind address for the HTTP server.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";

/// Default upstream for the geocoding API.
const DEFAULT_GEONAMES_BASE_URL: &str = "http://api.geonames.org";

/// Default upstream for the places API.
const DEFAULT_PLACES_BASE_URL: &str = "https://places-api.foursquare.com";

/// Default places API version header value.
const DEFAULT_PLACES_API_VERSION: &str = "2025-06-17";

/// Default public base for share links.
const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:3000";

/// Errors raised while reading the environment at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Base URL of the managed backend (auth + row storage).
    pub supabase_url: String,

    /// Anon key, sent with auth-service requests.
    pub supabase_key: String,

    /// Service-role key, used for row access and admin operations.
    pub supabase_service_key: String,

    /// Signing secret. Part of the deployment surface.
    pub secret_key: String,

    /// Account name for the geocoding API.
    pub geonames_username: String,

    /// Base URL of the geocoding API.
    pub geonames_base_url: String,

    /// Bearer key for the places API.
    pub places_api_key: String,

    /// Value for the places API version header.
    pub places_api_version: String,

    /// Base URL of the places API.
    pub places_base_url: String,

    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,

    /// Public base URL used when building trip share links.
    pub share_base_url: String,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|err| ConfigError::Invalid {
                key: "APP_LISTEN_ADDR",
                message: format!("{err}"),
            })?;

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| default_origins());

        Ok(Self {
            listen_addr,
            supabase_url: required("SUPABASE_URL")?,
            supabase_key: required("SUPABASE_KEY")?,
            supabase_service_key: required("SUPABASE_SERVICE_KEY")?,
            secret_key: required("SECRET_KEY")?,
            geonames_username: required("GEONAMES_USERNAME")?,
            geonames_base_url: env::var("GEONAMES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEONAMES_BASE_URL.to_string()),
            places_api_key: required("PLACES_API_KEY")?,
            places_api_version: env::var("PLACES_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_PLACES_API_VERSION.to_string()),
            places_base_url: env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PLACES_BASE_URL.to_string()),
            cors_origins,
            share_base_url: env::var("SHARE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_SHARE_BASE_URL.to_string()),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("http://a.example, http://b.example ,");
        assert_eq!(origins, vec!["http://a.example", "http://b.example"]);
    }

    #[test]
    fn parse_origins_empty_input() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn default_origins_cover_local_dev() {
        let origins = default_origins();
        assert!(origins.contains(&"http://localhost:3000".to_string()));
        assert!(origins.contains(&"http://localhost:8000".to_string()));
    }

    #[test]
    fn missing_variable_error_names_the_key() {
        let err = ConfigError::Missing("SUPABASE_URL");
        assert_eq!(
            err.to_string(),
            "missing required environment variable SUPABASE_URL"
        );
    }
}
