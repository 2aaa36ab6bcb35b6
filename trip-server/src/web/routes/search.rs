//! Public search routes.
//!
//! Pure pass-throughs to the geo and places APIs; no authentication.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::places::ATTRACTIONS_CATEGORY;
use crate::planner::estimate_cost;

use super::super::dto::{
    ActivitySearchQuery, ActivitySearchResult, CitySearchQuery, CitySearchResult,
};
use super::super::error::ApiError;
use super::super::state::AppState;

/// Rows requested from the geocoder per city search.
const CITY_SEARCH_ROWS: u8 = 10;

/// Rows requested from the places API per activity search.
const ACTIVITY_SEARCH_LIMIT: u32 = 15;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/search/cities", get(search_cities))
        .route("/search/activities", get(search_activities))
}

/// Search cities by free text.
async fn search_cities(
    State(state): State<AppState>,
    Query(query): Query<CitySearchQuery>,
) -> Result<Json<Vec<CitySearchResult>>, ApiError> {
    let matches = state.geo.search(&query.q, CITY_SEARCH_ROWS).await?;

    let results = matches
        .into_iter()
        .map(|m| CitySearchResult {
            city: m.city,
            country_code: m.country_code,
            latitude: m.latitude,
            longitude: m.longitude,
            population: m.population,
        })
        .collect();

    Ok(Json(results))
}

/// Search activities near a city, with optional category and cost filters.
async fn search_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivitySearchQuery>,
) -> Result<Json<Vec<ActivitySearchResult>>, ApiError> {
    let places = state
        .places
        .search(&query.city, ATTRACTIONS_CATEGORY, ACTIVITY_SEARCH_LIMIT)
        .await?;

    let category_filter = query.category.as_deref().map(str::to_lowercase);

    let results = places
        .into_iter()
        .filter_map(|place| {
            let category = place.primary_category().map(str::to_string);
            let estimated_cost = estimate_cost(category.as_deref().unwrap_or_default());

            if let Some(wanted) = &category_filter {
                let label = category.as_deref().unwrap_or_default().to_lowercase();
                if !label.contains(wanted) {
                    return None;
                }
            }

            if query.max_cost.is_some_and(|max| estimated_cost > max) {
                return None;
            }

            Some(ActivitySearchResult {
                fsq_place_id: place.fsq_place_id,
                name: place.name,
                category,
                estimated_cost,
                latitude: place.latitude,
                longitude: place.longitude,
            })
        })
        .collect::<Vec<_>>();

    Ok(Json(results))
}
