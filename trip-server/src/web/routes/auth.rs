//! Authentication routes.
//!
//! Sessions are created and revoked by the hosted auth service; these
//! handlers forward credentials and pair the resulting session with the
//! caller's profile row.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::store::NewUserProfile;

use super::super::dto::{
    LoginRequest, MessageResponse, RefreshRequest, SignupRequest, TokenResponse,
};
use super::super::error::ApiError;
use super::super::extract::bearer_token;
use super::super::state::AppState;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/refresh", post(refresh))
}

/// Register a new user and create their profile row.
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .auth
        .sign_up(&body.email, &body.password)
        .await
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    // The profile row mirrors the auth record; upsert so a retried sign-up
    // does not fail on the second attempt.
    let profile = state
        .store
        .upsert_user_profile(&NewUserProfile {
            id: session.user.id.clone(),
            email: body.email,
            full_name: body.full_name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token: session.access_token,
            user: profile,
        }),
    ))
}

/// Exchange email and password for a session.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state
        .auth
        .sign_in(&body.email, &body.password)
        .await
        .map_err(|err| {
            tracing::warn!("login failed: {err}");
            ApiError::Unauthorized
        })?;

    let profile = state
        .store
        .user_profile(&session.user.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(TokenResponse {
        access_token: session.access_token,
        user: profile,
    }))
}

/// Revoke the caller's session.
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;

    state
        .auth
        .sign_out(token)
        .await
        .map_err(|err| ApiError::bad_request(err.to_string()))?;

    Ok(Json(MessageResponse {
        message: "Successfully logged out".to_string(),
    }))
}

/// Exchange a refresh token for a new session.
async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let session = state
        .auth
        .refresh(&body.refresh_token)
        .await
        .map_err(|err| {
            tracing::warn!("token refresh failed: {err}");
            ApiError::Unauthorized
        })?;

    let profile = state
        .store
        .user_profile(&session.user.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(TokenResponse {
        access_token: session.access_token,
        user: profile,
    }))
}
