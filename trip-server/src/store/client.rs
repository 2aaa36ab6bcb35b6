//! Row-storage client.
//!
//! Speaks the PostgREST dialect of the managed backend: filters are
//! `column=eq.value` query parameters, writes opt into
//! `Prefer: return=representation` to get the affected rows back, and list
//! totals come from the `Content-Range` header under `Prefer: count=exact`.
//! Row access uses the service-role key; ownership checks happen in the web
//! layer, not via row-level security tokens.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::StoreError;
use super::types::{
    Activity, NewActivity, NewScheduleActivity, NewStop, NewTrip, NewUserProfile,
    ScheduleActivity, ScheduleActivityPatch, SharePatch, Stop, Trip, TripPatch, UserProfile,
    UserProfilePatch,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration shared by the auth and row-storage clients.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the managed backend.
    pub base_url: String,
    /// Anon key, used by the auth client.
    pub anon_key: String,
    /// Service-role key, used for row access and admin calls.
    pub service_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Create a new config for the given backend.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            service_key: service_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the row-storage API.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

/// Projection row used for max-order queries.
#[derive(Debug, serde::Deserialize)]
struct OrderRow {
    order: i64,
}

impl StoreClient {
    /// Create a new row-storage client with auth headers installed.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.service_key).map_err(|_| StoreError::Api {
            status: 0,
            message: "Invalid service key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("apikey"), api_key);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key)).map_err(
            |_| StoreError::Api {
                status: 0,
                message: "Invalid service key format".to_string(),
            },
        )?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    // --- trips ---

    pub async fn insert_trip(&self, row: &NewTrip) -> Result<Trip, StoreError> {
        self.insert("trips", row).await
    }

    /// Trips owned by a user, newest first, with the exact total row count.
    pub async fn trips_for_user(
        &self,
        user_id: &str,
        skip: u32,
        limit: u32,
    ) -> Result<(Vec<Trip>, u64), StoreError> {
        let response = self
            .http
            .get(self.endpoint("trips"))
            .header("Prefer", "count=exact")
            .query(&[
                ("user_id", format!("eq.{user_id}")),
                ("order", "created_at.desc".to_string()),
                ("offset", skip.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let total = response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total);

        let rows: Vec<Trip> = Self::rows(response).await?;
        let total = total.unwrap_or(rows.len() as u64);
        Ok((rows, total))
    }

    pub async fn trip_by_id(&self, trip_id: &str) -> Result<Option<Trip>, StoreError> {
        let rows = self
            .select("trips", &[("id", format!("eq.{trip_id}"))])
            .await?;
        Ok(first(rows))
    }

    /// A publicly shared trip, looked up by its share token.
    pub async fn trip_by_share_token(&self, token: &str) -> Result<Option<Trip>, StoreError> {
        let rows = self
            .select(
                "trips",
                &[
                    ("share_token", format!("eq.{token}")),
                    ("is_public", "eq.true".to_string()),
                ],
            )
            .await?;
        Ok(first(rows))
    }

    pub async fn update_trip(
        &self,
        trip_id: &str,
        patch: &TripPatch,
    ) -> Result<Option<Trip>, StoreError> {
        self.update("trips", ("id", trip_id), patch).await
    }

    pub async fn set_trip_share(
        &self,
        trip_id: &str,
        patch: &SharePatch,
    ) -> Result<Option<Trip>, StoreError> {
        self.update("trips", ("id", trip_id), patch).await
    }

    /// Delete a trip; returns whether a row was removed. Stops and
    /// activities cascade in the store.
    pub async fn delete_trip(&self, trip_id: &str) -> Result<bool, StoreError> {
        self.delete("trips", ("id", trip_id)).await
    }

    // --- stops ---

    pub async fn insert_stop(&self, row: &NewStop) -> Result<Stop, StoreError> {
        self.insert("stops", row).await
    }

    pub async fn stops_for_trip(&self, trip_id: &str) -> Result<Vec<Stop>, StoreError> {
        self.select(
            "stops",
            &[
                ("trip_id", format!("eq.{trip_id}")),
                ("order", "order.asc".to_string()),
            ],
        )
        .await
    }

    pub async fn stop_by_id(&self, stop_id: &str) -> Result<Option<Stop>, StoreError> {
        let rows = self
            .select("stops", &[("id", format!("eq.{stop_id}"))])
            .await?;
        Ok(first(rows))
    }

    /// Highest existing `order` among a trip's stops (at most one value).
    pub async fn max_stop_order(&self, trip_id: &str) -> Result<Vec<i64>, StoreError> {
        self.max_order("stops", ("trip_id", trip_id)).await
    }

    // --- activities ---

    pub async fn insert_activity(&self, row: &NewActivity) -> Result<Activity, StoreError> {
        self.insert("activities", row).await
    }

    pub async fn activities_for_stop(&self, stop_id: &str) -> Result<Vec<Activity>, StoreError> {
        self.select(
            "activities",
            &[
                ("stop_id", format!("eq.{stop_id}")),
                ("order", "order.asc".to_string()),
            ],
        )
        .await
    }

    /// Highest existing `order` among a stop's activities (at most one value).
    pub async fn max_activity_order(&self, stop_id: &str) -> Result<Vec<i64>, StoreError> {
        self.max_order("activities", ("stop_id", stop_id)).await
    }

    // --- user profiles ---

    pub async fn upsert_user_profile(
        &self,
        row: &NewUserProfile,
    ) -> Result<UserProfile, StoreError> {
        let response = self
            .http
            .post(self.endpoint("users"))
            .header(
                "Prefer",
                "resolution=merge-duplicates,return=representation",
            )
            .json(row)
            .send()
            .await?;

        let rows: Vec<UserProfile> = Self::rows(response).await?;
        first(rows).ok_or_else(|| StoreError::Api {
            status: 0,
            message: "upsert into users returned no rows".to_string(),
        })
    }

    pub async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let rows = self
            .select("users", &[("id", format!("eq.{user_id}"))])
            .await?;
        Ok(first(rows))
    }

    pub async fn update_user_profile(
        &self,
        user_id: &str,
        patch: &UserProfilePatch,
    ) -> Result<Option<UserProfile>, StoreError> {
        self.update("users", ("id", user_id), patch).await
    }

    // --- saved day plans ---

    pub async fn insert_schedule_activity(
        &self,
        row: &NewScheduleActivity,
    ) -> Result<ScheduleActivity, StoreError> {
        self.insert("schedule_activities", row).await
    }

    pub async fn schedule_for_trip(
        &self,
        trip_id: &str,
    ) -> Result<Vec<ScheduleActivity>, StoreError> {
        self.select(
            "schedule_activities",
            &[
                ("trip_id", format!("eq.{trip_id}")),
                ("order", "day.asc".to_string()),
            ],
        )
        .await
    }

    pub async fn schedule_activity_by_id(
        &self,
        id: &str,
    ) -> Result<Option<ScheduleActivity>, StoreError> {
        let rows = self
            .select("schedule_activities", &[("id", format!("eq.{id}"))])
            .await?;
        Ok(first(rows))
    }

    pub async fn update_schedule_activity(
        &self,
        id: &str,
        patch: &ScheduleActivityPatch,
    ) -> Result<Option<ScheduleActivity>, StoreError> {
        self.update("schedule_activities", ("id", id), patch).await
    }

    pub async fn delete_schedule_activity(&self, id: &str) -> Result<bool, StoreError> {
        self.delete("schedule_activities", ("id", id)).await
    }

    // --- plumbing ---

    async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .post(self.endpoint(table))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = Self::rows(response).await?;
        first(rows).ok_or_else(|| StoreError::Api {
            status: 0,
            message: format!("insert into {table} returned no rows"),
        })
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .http
            .get(self.endpoint(table))
            .query(query)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn update<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        filter: (&str, &str),
        body: &B,
    ) -> Result<Option<T>, StoreError> {
        let response = self
            .http
            .patch(self.endpoint(table))
            .header("Prefer", "return=representation")
            .query(&[(filter.0, format!("eq.{}", filter.1))])
            .json(body)
            .send()
            .await?;

        let rows: Vec<T> = Self::rows(response).await?;
        Ok(first(rows))
    }

    async fn delete(&self, table: &str, filter: (&str, &str)) -> Result<bool, StoreError> {
        let response = self
            .http
            .delete(self.endpoint(table))
            .header("Prefer", "return=representation")
            .query(&[(filter.0, format!("eq.{}", filter.1))])
            .send()
            .await?;

        let rows: Vec<serde_json::Value> = Self::rows(response).await?;
        Ok(!rows.is_empty())
    }

    async fn max_order(
        &self,
        table: &str,
        parent: (&str, &str),
    ) -> Result<Vec<i64>, StoreError> {
        let rows: Vec<OrderRow> = self
            .select(
                table,
                &[
                    (parent.0, format!("eq.{}", parent.1)),
                    ("select", "order".to_string()),
                    ("order", "order.desc".to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.order).collect())
    }

    async fn rows<T: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<T>, StoreError> {
        let status = response.status();

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
}

fn first<T>(rows: Vec<T>) -> Option<T> {
    rows.into_iter().next()
}

/// Total row count from a `Content-Range` header value such as `0-9/42`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StoreConfig::new("https://db.example", "anon", "service");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn config_with_timeout() {
        let config = StoreConfig::new("https://db.example", "anon", "service").with_timeout(30);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let config = StoreConfig::new("https://db.example", "anon", "service");
        assert!(StoreClient::new(&config).is_ok());
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(parse_content_range_total("0-9/42"), Some(42));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-9/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn order_row_projection() {
        let rows: Vec<OrderRow> = serde_json::from_str(r#"[{"order": 5}]"#).unwrap();
        assert_eq!(rows[0].order, 5);
    }
}
