//! Itinerary building routes: stops, activities, and auto-planning.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use futures::future::join_all;

use crate::places::ATTRACTIONS_CATEGORY;
use crate::planner::{
    ACTIVITY_ORDER_BASE, STOP_ORDER_BASE, build_days, day_count, next_order, place_fetch_limit,
};
use crate::store::{Activity, NewActivity, NewStop};

use super::super::authz::{owned_stop, owned_trip};
use super::super::dto::{
    ActivityCreateRequest, AutoPlanRequest, AutoPlanResponse, StopCreateRequest,
    StopWithActivities,
};
use super::super::error::ApiError;
use super::super::extract::CurrentUser;
use super::super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/itinerary/trips/:trip_id/stops",
            post(add_stop).get(list_stops),
        )
        .route(
            "/itinerary/stops/:stop_id/activities",
            post(add_activity).get(list_activities),
        )
        .route("/itinerary/auto-plan", post(auto_plan))
}

/// Append a stop to a trip.
///
/// The requested location is resolved through the geocoder; an unresolvable
/// city is a 404. The stop's position comes from the ordered-child
/// sequencer.
async fn add_stop(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
    Json(body): Json<StopCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    owned_trip(&state, &trip_id, &user.id).await?;

    let city = state
        .geo
        .validate_city(&body.location)
        .await?
        .ok_or_else(|| ApiError::not_found("City not found"))?;

    let existing = state.store.max_stop_order(&trip_id).await?;
    let order = next_order(&existing, STOP_ORDER_BASE);

    let now = Utc::now();
    let stop = state
        .store
        .insert_stop(&NewStop {
            trip_id,
            name: body.name,
            location: city.city,
            latitude: city.latitude,
            longitude: city.longitude,
            arrival_date: body.arrival_date,
            departure_date: body.departure_date,
            order,
            notes: body.notes,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(stop)))
}

/// A trip's stops in display order, each with its activities.
async fn list_stops(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<StopWithActivities>>, ApiError> {
    owned_trip(&state, &trip_id, &user.id).await?;

    let stops = state.store.stops_for_trip(&trip_id).await?;

    let activity_lists = join_all(
        stops
            .iter()
            .map(|stop| state.store.activities_for_stop(&stop.id)),
    )
    .await
    .into_iter()
    .collect::<Result<Vec<Vec<Activity>>, _>>()?;

    let combined = stops
        .into_iter()
        .zip(activity_lists)
        .map(|(stop, activities)| StopWithActivities { stop, activities })
        .collect();

    Ok(Json(combined))
}

/// Append an activity to a stop.
async fn add_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(stop_id): Path<String>,
    Json(body): Json<ActivityCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let stop = owned_stop(&state, &stop_id, &user.id).await?;

    let existing = state.store.max_activity_order(&stop.id).await?;
    let order = next_order(&existing, ACTIVITY_ORDER_BASE);

    let now = Utc::now();
    let activity = state
        .store
        .insert_activity(&NewActivity {
            stop_id: stop.id,
            name: body.name,
            activity_type: body.activity_type,
            scheduled_time: body.scheduled_time,
            duration_minutes: body.duration_minutes,
            cost: body.cost,
            currency: body.currency.unwrap_or_else(|| "USD".to_string()),
            latitude: body.latitude,
            longitude: body.longitude,
            foursquare_id: body.fsq_place_id,
            order,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

/// A stop's activities in display order.
async fn list_activities(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(stop_id): Path<String>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let stop = owned_stop(&state, &stop_id, &user.id).await?;
    let activities = state.store.activities_for_stop(&stop.id).await?;
    Ok(Json(activities))
}

/// Generate a day-wise itinerary for a city and date range.
///
/// Deterministic given identical upstream responses: fetched points of
/// interest are split into contiguous per-day chunks, and the output always
/// has one entry per day of the range even when the fetch comes back short.
async fn auto_plan(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(body): Json<AutoPlanRequest>,
) -> Result<Json<AutoPlanResponse>, ApiError> {
    let days = day_count(body.start_date, body.end_date)?;

    let city = state
        .geo
        .validate_city(&body.city)
        .await?
        .ok_or_else(|| ApiError::not_found("City not found"))?;

    let places = state
        .places
        .search(&city.city, ATTRACTIONS_CATEGORY, place_fetch_limit(days))
        .await?;

    let plan = build_days(&city.city, body.start_date, days, &places);

    Ok(Json(AutoPlanResponse {
        city: city.city,
        start_date: body.start_date,
        end_date: body.end_date,
        days: plan,
    }))
}
