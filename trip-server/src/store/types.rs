//! Row and session types for the managed backend.
//!
//! Row structs mirror the stored tables and double as response bodies.
//! `New*` structs are insert payloads; `*Patch` structs are partial updates
//! that omit absent fields from the request body, so an unset field leaves
//! the column untouched.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A trip owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a trip.
#[derive(Debug, Serialize)]
pub struct NewTrip {
    pub user_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a trip. Absent fields are left untouched.
#[derive(Debug, Serialize)]
pub struct TripPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

/// Share-state update for a trip.
///
/// Unlike [`TripPatch`], `share_token` is always serialized so that `None`
/// clears the column when a trip is unshared.
#[derive(Debug, Serialize)]
pub struct SharePatch {
    pub share_token: Option<String>,
    pub is_public: bool,
    pub updated_at: DateTime<Utc>,
}

/// An ordered stop within a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub trip_id: String,
    pub name: String,
    /// Canonical city name resolved by the geocoder.
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub order: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a stop.
#[derive(Debug, Serialize)]
pub struct NewStop {
    pub trip_id: String,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An ordered activity within a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub stop_id: String,
    pub name: String,
    /// Category label, e.g. "Museum" or "Outdoor Park".
    pub activity_type: String,
    pub scheduled_time: Option<NaiveTime>,
    pub duration_minutes: Option<i64>,
    pub cost: Option<f64>,
    pub currency: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// External place identifier, when imported from the places API.
    pub foursquare_id: Option<String>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for an activity.
#[derive(Debug, Serialize)]
pub struct NewActivity {
    pub stop_id: String,
    pub name: String,
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foursquare_id: Option<String>,
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user profile row, kept alongside the auth service's own records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(default = "default_language")]
    pub language_preference: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Upsert payload for a user profile.
#[derive(Debug, Serialize)]
pub struct NewUserProfile {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

/// Partial update for a user profile.
#[derive(Debug, Serialize)]
pub struct UserProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_preference: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// A saved day-plan row produced from auto-plan output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleActivity {
    pub id: String,
    pub trip_id: String,
    pub city: String,
    /// 1-based trip day.
    pub day: i64,
    pub fsq_place_id: String,
    pub name: String,
    pub category: Option<String>,
    pub estimated_cost: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a saved day-plan row.
#[derive(Debug, Serialize)]
pub struct NewScheduleActivity {
    pub trip_id: String,
    pub city: String,
    pub day: i64,
    pub fsq_place_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for a saved day-plan row.
#[derive(Debug, Serialize)]
pub struct ScheduleActivityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

/// The auth service's view of a user.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// A session issued by the auth service.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn trip_row_round_trips() {
        let body = r#"{
            "id": "t1",
            "user_id": "u1",
            "name": "Iberia in May",
            "start_date": "2024-05-01",
            "end_date": "2024-05-07",
            "photo_url": null,
            "description": "slow trains, long lunches",
            "is_public": false,
            "share_token": null,
            "created_at": "2024-04-01T09:30:00+00:00",
            "updated_at": "2024-04-01T09:30:00+00:00"
        }"#;

        let trip: Trip = serde_json::from_str(body).unwrap();
        assert_eq!(trip.name, "Iberia in May");
        assert_eq!(
            trip.start_date,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(!trip.is_public);
        assert!(trip.share_token.is_none());
    }

    #[test]
    fn trip_patch_omits_unset_fields() {
        let patch = TripPatch {
            name: Some("Renamed".into()),
            start_date: None,
            end_date: None,
            photo_url: None,
            description: None,
            is_public: None,
            updated_at: "2024-04-02T10:00:00Z".parse().unwrap(),
        };

        let body = serde_json::to_value(&patch).unwrap();
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "updated_at"]);
    }

    #[test]
    fn share_patch_serializes_null_token() {
        let patch = SharePatch {
            share_token: None,
            is_public: false,
            updated_at: "2024-04-02T10:00:00Z".parse().unwrap(),
        };

        let body = serde_json::to_value(&patch).unwrap();
        assert!(body.as_object().unwrap().contains_key("share_token"));
        assert!(body["share_token"].is_null());
    }

    #[test]
    fn profile_defaults_language() {
        let body = r#"{
            "id": "u1",
            "email": "ada@example.com",
            "full_name": null,
            "avatar_url": null,
            "created_at": "2024-04-01T09:30:00+00:00",
            "updated_at": "2024-04-01T09:30:00+00:00"
        }"#;

        let profile: UserProfile = serde_json::from_str(body).unwrap();
        assert_eq!(profile.language_preference, "en");
    }
}
