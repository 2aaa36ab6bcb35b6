//! Ownership checks along the User → Trip → Stop chain.
//!
//! Every mutating or single-item read walks the parent chain up to the
//! trip's owner. A resource that is missing and a resource that belongs to
//! another user are indistinguishable to the caller: both come back as
//! `NotFound`, so the API leaks nothing about other users' data.

use crate::store::{Stop, Trip};

use super::error::ApiError;
use super::state::AppState;

/// Admit only the trip's owner.
pub fn require_owner(trip: Option<Trip>, user_id: &str) -> Result<Trip, ApiError> {
    match trip {
        Some(trip) if trip.user_id == user_id => Ok(trip),
        _ => Err(ApiError::not_found("Trip not found")),
    }
}

/// Fetch a trip and verify it belongs to the caller.
pub async fn owned_trip(
    state: &AppState,
    trip_id: &str,
    user_id: &str,
) -> Result<Trip, ApiError> {
    let trip = state.store.trip_by_id(trip_id).await?;
    require_owner(trip, user_id)
}

/// Fetch a stop and verify its trip belongs to the caller.
pub async fn owned_stop(
    state: &AppState,
    stop_id: &str,
    user_id: &str,
) -> Result<Stop, ApiError> {
    let Some(stop) = state.store.stop_by_id(stop_id).await? else {
        return Err(ApiError::not_found("Stop not found"));
    };
    owned_trip(state, &stop.trip_id, user_id).await?;
    Ok(stop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn trip_owned_by(user_id: &str) -> Trip {
        let now = Utc::now();
        Trip {
            id: "t1".into(),
            user_id: user_id.into(),
            name: "Weekend away".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            photo_url: None,
            description: None,
            is_public: false,
            share_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_is_admitted() {
        let trip = require_owner(Some(trip_owned_by("u1")), "u1").unwrap();
        assert_eq!(trip.id, "t1");
    }

    #[test]
    fn foreign_trip_reads_as_missing() {
        // Not forbidden: the caller cannot learn the trip exists.
        let err = require_owner(Some(trip_owned_by("u1")), "u2").unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn absent_trip_is_missing() {
        let err = require_owner(None, "u1").unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
