//! HTTP route handlers.

mod auth;
mod itinerary;
mod profile;
mod schedule;
mod search;
mod trips;

use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::AppConfig;

use super::dto::ServiceInfo;
use super::state::AppState;

/// Create the application router.
///
/// All resource routes live under the versioned prefix; only the root and
/// health endpoints sit outside it.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(trips::router())
        .merge(profile::router())
        .merge(itinerary::router())
        .merge(search::router())
        .merge(schedule::router());

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(cors)
        .with_state(state)
}

/// Root endpoint.
async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "trip-server",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// CORS layer from the configured origin list.
///
/// Origins are enumerated rather than wildcarded because the API allows
/// credentials.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
