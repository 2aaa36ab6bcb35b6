//! Saved day-plan routes.
//!
//! Persists rows produced from auto-plan output so a generated itinerary
//! can be kept and edited per trip day.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{post, put};
use axum::{Json, Router};
use chrono::Utc;

use crate::planner::estimate_cost;
use crate::store::{NewScheduleActivity, ScheduleActivity, ScheduleActivityPatch};

use super::super::authz::owned_trip;
use super::super::dto::{ScheduleCreateRequest, ScheduleListQuery, ScheduleUpdateRequest};
use super::super::error::ApiError;
use super::super::extract::CurrentUser;
use super::super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/schedule/activities",
            post(create_activity).get(list_activities),
        )
        .route(
            "/schedule/activities/:activity_id",
            put(update_activity).delete(delete_activity),
        )
}

/// Save a day-plan row for one of the caller's trips.
async fn create_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ScheduleCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    owned_trip(&state, &body.trip_id, &user.id).await?;

    let estimated_cost = body
        .estimated_cost
        .or_else(|| body.category.as_deref().map(estimate_cost));

    let now = Utc::now();
    let row = state
        .store
        .insert_schedule_activity(&NewScheduleActivity {
            trip_id: body.trip_id,
            city: body.city,
            day: body.day,
            fsq_place_id: body.fsq_place_id,
            name: body.name,
            category: body.category,
            estimated_cost,
            latitude: body.latitude,
            longitude: body.longitude,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// A trip's saved day-plan rows, ordered by day.
async fn list_activities(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ScheduleListQuery>,
) -> Result<Json<Vec<ScheduleActivity>>, ApiError> {
    owned_trip(&state, &query.trip_id, &user.id).await?;
    let rows = state.store.schedule_for_trip(&query.trip_id).await?;
    Ok(Json(rows))
}

/// Partially update a saved day-plan row.
async fn update_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(activity_id): Path<String>,
    Json(body): Json<ScheduleUpdateRequest>,
) -> Result<Json<ScheduleActivity>, ApiError> {
    let existing = state
        .store
        .schedule_activity_by_id(&activity_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity not found"))?;

    owned_trip(&state, &existing.trip_id, &user.id).await?;

    let patch = ScheduleActivityPatch {
        name: body.name,
        category: body.category,
        estimated_cost: body.estimated_cost,
        day: body.day,
        updated_at: Utc::now(),
    };

    state
        .store
        .update_schedule_activity(&activity_id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Activity not found"))
}

/// Delete a saved day-plan row.
async fn delete_activity(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(activity_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .store
        .schedule_activity_by_id(&activity_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Activity not found"))?;

    owned_trip(&state, &existing.trip_id, &user.id).await?;

    if !state.store.delete_schedule_activity(&activity_id).await? {
        return Err(ApiError::not_found("Activity not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
