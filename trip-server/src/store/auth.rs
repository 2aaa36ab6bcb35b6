//! Auth service client.
//!
//! Sessions are issued and validated entirely by the hosted auth service;
//! this process never verifies or caches tokens itself. Every authenticated
//! request forwards the caller's bearer token upstream.

use serde::Deserialize;
use serde_json::json;

use super::client::StoreConfig;
use super::error::StoreError;
use super::types::{AuthSession, AuthUser};

/// Raw session response. The service omits the token fields when a session
/// could not be issued (e.g. sign-up pending email confirmation).
#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<AuthUser>,
}

/// Client for the GoTrue-style auth API.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_key: String,
}

impl AuthClient {
    /// Create a new auth client.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            anon_key: config.anon_key.clone(),
            service_key: config.service_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Register a new user with email and password.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, StoreError> {
        let response = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::session_from(response).await
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, StoreError> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::session_from(response).await
    }

    /// Exchange a refresh token for a new session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, StoreError> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        Self::session_from(response).await
    }

    /// Revoke the session behind a bearer token.
    pub async fn sign_out(&self, token: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }

    /// Resolve a bearer token to its user.
    ///
    /// This is the per-request validation path: an invalid or expired token
    /// surfaces as [`StoreError::Unauthorized`].
    pub async fn get_user(&self, token: &str) -> Result<AuthUser, StoreError> {
        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Json {
            message: e.to_string(),
        })
    }

    /// Delete a user outright (service-role credential).
    ///
    /// Row cascades for the user's trips, stops, and activities are the
    /// store's responsibility, not this client's.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("admin/users/{user_id}")))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(())
    }

    async fn session_from(response: reqwest::Response) -> Result<AuthSession, StoreError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let raw: SessionResponse = serde_json::from_str(&body).map_err(|e| StoreError::Json {
            message: e.to_string(),
        })?;

        match (raw.access_token, raw.user) {
            (Some(access_token), Some(user)) => Ok(AuthSession {
                access_token,
                refresh_token: raw.refresh_token,
                user,
            }),
            _ => Err(StoreError::Api {
                status: status.as_u16(),
                message: "no session issued".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_response_with_tokens() {
        let body = r#"{
            "access_token": "jwt-here",
            "token_type": "bearer",
            "refresh_token": "refresh-here",
            "user": {"id": "u1", "email": "ada@example.com"}
        }"#;

        let raw: SessionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(raw.access_token.as_deref(), Some("jwt-here"));
        assert_eq!(raw.user.unwrap().id, "u1");
    }

    #[test]
    fn session_response_without_session() {
        // Shape returned when sign-up is pending confirmation.
        let body = r#"{"id": "u1", "email": "ada@example.com"}"#;
        let raw: SessionResponse = serde_json::from_str(body).unwrap();
        assert!(raw.access_token.is_none());
        assert!(raw.user.is_none());
    }
}
