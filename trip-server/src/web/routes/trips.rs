//! Trip CRUD and sharing routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use rand::RngCore;

use crate::store::{NewTrip, SharePatch, Trip, TripPatch};

use super::super::authz::owned_trip;
use super::super::dto::{
    ShareTripResponse, TripCreateRequest, TripListQuery, TripListResponse, TripUpdateRequest,
};
use super::super::error::ApiError;
use super::super::extract::CurrentUser;
use super::super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/shared/:token", get(shared_trip))
        .route(
            "/trips/:trip_id",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
        .route(
            "/trips/:trip_id/share",
            axum::routing::post(share_trip).delete(unshare_trip),
        )
}

/// Create a trip for the caller.
async fn create_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<TripCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let trip = state
        .store
        .insert_trip(&NewTrip {
            user_id: user.id,
            name: body.name,
            start_date: body.start_date,
            end_date: body.end_date,
            photo_url: body.photo_url,
            description: body.description,
            created_at: now,
            updated_at: now,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(trip)))
}

/// The caller's trips, newest first.
async fn list_trips(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<TripListQuery>,
) -> Result<Json<TripListResponse>, ApiError> {
    let (trips, total) = state
        .store
        .trips_for_user(&user.id, query.skip, query.limit)
        .await?;

    Ok(Json(TripListResponse { trips, total }))
}

/// A single trip, owner only.
async fn get_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    let trip = owned_trip(&state, &trip_id, &user.id).await?;
    Ok(Json(trip))
}

/// Partially update a trip, owner only.
async fn update_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
    Json(body): Json<TripUpdateRequest>,
) -> Result<Json<Trip>, ApiError> {
    owned_trip(&state, &trip_id, &user.id).await?;

    let patch = TripPatch {
        name: body.name,
        start_date: body.start_date,
        end_date: body.end_date,
        photo_url: body.photo_url,
        description: body.description,
        is_public: body.is_public,
        updated_at: Utc::now(),
    };

    state
        .store
        .update_trip(&trip_id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Trip not found"))
}

/// Delete a trip, owner only. Stops and activities cascade in the store.
async fn delete_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    owned_trip(&state, &trip_id, &user.id).await?;

    if !state.store.delete_trip(&trip_id).await? {
        return Err(ApiError::not_found("Trip not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Mint (or reuse) a public share link for a trip.
async fn share_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<Json<ShareTripResponse>, ApiError> {
    let trip = owned_trip(&state, &trip_id, &user.id).await?;

    // An already-shared trip keeps its token so existing links stay valid.
    let share_token = match trip.share_token {
        Some(token) => token,
        None => {
            let token = new_share_token();
            state
                .store
                .set_trip_share(
                    &trip_id,
                    &SharePatch {
                        share_token: Some(token.clone()),
                        is_public: true,
                        updated_at: Utc::now(),
                    },
                )
                .await?
                .ok_or_else(|| ApiError::not_found("Trip not found"))?;
            token
        }
    };

    let share_url = format!("{}/shared/{}", state.config.share_base_url, share_token);

    Ok(Json(ShareTripResponse {
        share_url,
        share_token,
    }))
}

/// Remove public sharing from a trip.
async fn unshare_trip(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(trip_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    owned_trip(&state, &trip_id, &user.id).await?;

    state
        .store
        .set_trip_share(
            &trip_id,
            &SharePatch {
                share_token: None,
                is_public: false,
                updated_at: Utc::now(),
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Trip not found"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// A publicly shared trip. No authentication required.
async fn shared_trip(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    state
        .store
        .trip_by_share_token(&token)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Shared trip not found"))
}

/// Opaque URL-safe token granting unauthenticated read access.
fn new_share_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_tokens_are_url_safe() {
        let token = new_share_token();
        // 32 bytes -> 43 base64 chars, unpadded.
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn share_tokens_are_not_reused() {
        assert_ne!(new_share_token(), new_share_token());
    }
}
