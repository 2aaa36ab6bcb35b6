//! Data transfer objects for web requests and responses.
//!
//! Row types from the store double as response bodies where the shapes
//! coincide; everything else is declared here, one type per endpoint, so
//! malformed input fails at the boundary instead of deep in a handler.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::planner::DayPlan;
use crate::store::{Activity, Stop, Trip, UserProfile};

/// Request to register a new user.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Request to sign in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to refresh a session.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// A session plus the caller's profile.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub user: UserProfile,
}

/// Plain confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Partial profile update.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub language_preference: Option<String>,
}

/// Request to create a trip.
#[derive(Debug, Deserialize)]
pub struct TripCreateRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub photo_url: Option<String>,
    pub description: Option<String>,
}

/// Partial trip update.
#[derive(Debug, Deserialize)]
pub struct TripUpdateRequest {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

/// Pagination for trip listing.
#[derive(Debug, Deserialize)]
pub struct TripListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_trip_limit")]
    pub limit: u32,
}

fn default_trip_limit() -> u32 {
    100
}

/// A page of trips with the exact total.
#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub trips: Vec<Trip>,
    pub total: u64,
}

/// Share link for a trip.
#[derive(Debug, Serialize)]
pub struct ShareTripResponse {
    pub share_url: String,
    pub share_token: String,
}

/// Request to add a stop to a trip.
#[derive(Debug, Deserialize)]
pub struct StopCreateRequest {
    pub name: String,
    /// Free-text place name, resolved through the geocoder.
    pub location: String,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// A stop together with its ordered activities.
#[derive(Debug, Serialize)]
pub struct StopWithActivities {
    #[serde(flatten)]
    pub stop: Stop,
    pub activities: Vec<Activity>,
}

/// Request to add an activity to a stop.
#[derive(Debug, Deserialize)]
pub struct ActivityCreateRequest {
    pub name: String,
    /// Category label, e.g. "Museum".
    pub activity_type: String,
    pub scheduled_time: Option<NaiveTime>,
    pub duration_minutes: Option<i64>,
    pub cost: Option<f64>,
    /// Defaults to USD.
    pub currency: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// External place id, when imported from search results.
    pub fsq_place_id: Option<String>,
}

/// Request to auto-generate a day-wise itinerary.
#[derive(Debug, Deserialize)]
pub struct AutoPlanRequest {
    pub city: String,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
}

/// A generated itinerary.
#[derive(Debug, Serialize)]
pub struct AutoPlanResponse {
    /// Canonical city name from the geocoder.
    pub city: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DayPlan>,
}

/// City search parameters.
#[derive(Debug, Deserialize)]
pub struct CitySearchQuery {
    pub q: String,
}

/// A city search hit.
#[derive(Debug, Serialize)]
pub struct CitySearchResult {
    pub city: String,
    pub country_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub population: Option<i64>,
}

/// Activity search parameters.
#[derive(Debug, Deserialize)]
pub struct ActivitySearchQuery {
    pub city: String,
    /// Case-insensitive substring filter on the category label.
    pub category: Option<String>,
    /// Keep only results whose estimated cost does not exceed this.
    pub max_cost: Option<i64>,
}

/// An activity search hit with its estimated cost bucket.
#[derive(Debug, Serialize)]
pub struct ActivitySearchResult {
    pub fsq_place_id: String,
    pub name: String,
    pub category: Option<String>,
    pub estimated_cost: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Request to save a day-plan row.
#[derive(Debug, Deserialize)]
pub struct ScheduleCreateRequest {
    pub trip_id: String,
    pub city: String,
    /// 1-based trip day.
    pub day: i64,
    pub fsq_place_id: String,
    pub name: String,
    pub category: Option<String>,
    /// Falls back to the category cost heuristic when absent.
    pub estimated_cost: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Partial update for a saved day-plan row.
#[derive(Debug, Deserialize)]
pub struct ScheduleUpdateRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub estimated_cost: Option<i64>,
    pub day: Option<i64>,
}

/// Filter for listing saved day-plan rows.
#[derive(Debug, Deserialize)]
pub struct ScheduleListQuery {
    pub trip_id: String,
}

/// Root endpoint payload.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}
