//! User profile routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::store::{UserProfile, UserProfilePatch};

use super::super::dto::ProfileUpdateRequest;
use super::super::error::ApiError;
use super::super::extract::CurrentUser;
use super::super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new().route("/profile/me", get(me).put(update_me).delete(delete_me))
}

/// The caller's profile.
async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .store
        .user_profile(&user.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User profile not found"))
}

/// Partially update the caller's profile.
async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let patch = UserProfilePatch {
        full_name: body.full_name,
        avatar_url: body.avatar_url,
        language_preference: body.language_preference,
        updated_at: Utc::now(),
    };

    state
        .store
        .update_user_profile(&user.id, &patch)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User profile not found"))
}

/// Delete the caller's account.
///
/// The auth service removes the user; the store cascades the profile row
/// and everything under the user's trips.
async fn delete_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, ApiError> {
    state
        .auth
        .delete_user(&user.id)
        .await
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    Ok(StatusCode::NO_CONTENT)
}
