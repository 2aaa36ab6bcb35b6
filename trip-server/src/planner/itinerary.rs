//! Day-wise itinerary construction.
//!
//! Partitions a fetched list of points of interest across the days of a
//! trip. The split is deterministic: contiguous chunks of
//! `max(floor(total / days), 1)` in fetch order, one chunk per day. Any
//! remainder beyond `per_day * days` is dropped rather than redistributed,
//! and when fewer points than days were fetched the later days come out
//! empty. The day count always equals the requested range length.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::places::Place;

/// Points of interest requested per trip day.
pub const POIS_PER_DAY: u32 = 5;

/// Largest page the places API will serve.
pub const MAX_PLACES_LIMIT: u32 = 50;

/// Errors from itinerary construction.
#[derive(Debug, thiserror::Error)]
pub enum ItineraryError {
    /// The end date precedes the start date.
    #[error("end date must not be before start date")]
    InvalidRange,
}

/// One day of a generated itinerary.
#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    /// 1-based day index.
    pub day: u32,
    pub date: NaiveDate,
    pub city: String,
    pub activities: Vec<PlannedPlace>,
}

/// A point of interest assigned to a day.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedPlace {
    pub fsq_place_id: String,
    pub name: String,
    pub category: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PlannedPlace {
    fn from_place(place: &Place) -> Self {
        Self {
            fsq_place_id: place.fsq_place_id.clone(),
            name: place.name.clone(),
            category: place.primary_category().map(str::to_string),
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

/// Number of days in an inclusive date range.
pub fn day_count(start: NaiveDate, end: NaiveDate) -> Result<u32, ItineraryError> {
    let days = (end - start).num_days() + 1;
    if days < 1 {
        return Err(ItineraryError::InvalidRange);
    }
    Ok(days as u32)
}

/// How many points of interest to request for a trip of `days` days.
pub fn place_fetch_limit(days: u32) -> u32 {
    (days * POIS_PER_DAY).min(MAX_PLACES_LIMIT)
}

/// Assign fetched places to days.
///
/// `days` must come from [`day_count`] and is therefore at least 1.
pub fn build_days(city: &str, start: NaiveDate, days: u32, places: &[Place]) -> Vec<DayPlan> {
    let per_day = (places.len() / days as usize).max(1);

    (0..days)
        .map(|offset| {
            let from = offset as usize * per_day;
            let to = (from + per_day).min(places.len());
            let chunk: &[Place] = if from < places.len() {
                &places[from..to]
            } else {
                &[]
            };

            DayPlan {
                day: offset + 1,
                date: start + Days::new(u64::from(offset)),
                city: city.to_string(),
                activities: chunk.iter().map(PlannedPlace::from_place).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fake_places(n: usize) -> Vec<Place> {
        let body: Vec<String> = (0..n)
            .map(|i| {
                format!(
                    r#"{{"fsq_place_id": "p{i}", "name": "Place {i}", "categories": [{{"name": "Landmark"}}]}}"#
                )
            })
            .collect();
        serde_json::from_str(&format!("[{}]", body.join(","))).unwrap()
    }

    #[test]
    fn inclusive_day_count() {
        assert_eq!(day_count(date(2024, 1, 1), date(2024, 1, 3)).unwrap(), 3);
        assert_eq!(day_count(date(2024, 1, 1), date(2024, 1, 1)).unwrap(), 1);
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            day_count(date(2024, 1, 3), date(2024, 1, 1)),
            Err(ItineraryError::InvalidRange)
        ));
    }

    #[test]
    fn fetch_limit_scales_with_days() {
        assert_eq!(place_fetch_limit(3), 15);
        assert_eq!(place_fetch_limit(1), 5);
    }

    #[test]
    fn fetch_limit_is_capped() {
        assert_eq!(place_fetch_limit(20), MAX_PLACES_LIMIT);
    }

    #[test]
    fn ten_places_over_three_days() {
        let places = fake_places(10);
        let plan = build_days("Lisbon", date(2024, 1, 1), 3, &places);

        assert_eq!(plan.len(), 3);
        // per_day = 3; the tenth place is dropped, not redistributed.
        let ids: Vec<Vec<&str>> = plan
            .iter()
            .map(|day| {
                day.activities
                    .iter()
                    .map(|a| a.fsq_place_id.as_str())
                    .collect()
            })
            .collect();
        assert_eq!(ids[0], vec!["p0", "p1", "p2"]);
        assert_eq!(ids[1], vec!["p3", "p4", "p5"]);
        assert_eq!(ids[2], vec!["p6", "p7", "p8"]);
    }

    #[test]
    fn day_count_holds_with_no_places() {
        let plan = build_days("Lisbon", date(2024, 1, 1), 3, &[]);

        assert_eq!(plan.len(), 3);
        assert!(plan.iter().all(|day| day.activities.is_empty()));
        assert_eq!(plan[0].date, date(2024, 1, 1));
        assert_eq!(plan[1].date, date(2024, 1, 2));
        assert_eq!(plan[2].date, date(2024, 1, 3));
    }

    #[test]
    fn fewer_places_than_days_leaves_later_days_empty() {
        let places = fake_places(2);
        let plan = build_days("Lisbon", date(2024, 1, 1), 3, &places);

        assert_eq!(plan[0].activities.len(), 1);
        assert_eq!(plan[1].activities.len(), 1);
        assert!(plan[2].activities.is_empty());
    }

    #[test]
    fn days_are_numbered_and_dated_in_order() {
        let plan = build_days("Lisbon", date(2024, 2, 28), 2, &fake_places(4));

        assert_eq!(plan[0].day, 1);
        assert_eq!(plan[1].day, 2);
        assert_eq!(plan[0].date, date(2024, 2, 28));
        assert_eq!(plan[1].date, date(2024, 2, 29));
        assert!(plan.iter().all(|day| day.city == "Lisbon"));
    }

    #[test]
    fn places_carry_their_category_and_id() {
        let plan = build_days("Lisbon", date(2024, 1, 1), 1, &fake_places(1));
        let activity = &plan[0].activities[0];

        assert_eq!(activity.fsq_place_id, "p0");
        assert_eq!(activity.category.as_deref(), Some("Landmark"));
    }

    proptest! {
        #[test]
        fn partition_invariants(days in 1u32..10, n in 0usize..60) {
            let places = fake_places(n);
            let plan = build_days("Lisbon", date(2024, 5, 1), days, &places);

            // One entry per day, no matter how many places were fetched.
            prop_assert_eq!(plan.len(), days as usize);

            let per_day = (n / days as usize).max(1);
            let mut flattened = Vec::new();
            for day in &plan {
                prop_assert!(day.activities.len() <= per_day);
                flattened.extend(day.activities.iter().map(|a| a.fsq_place_id.clone()));
            }

            // Chunks preserve fetch order: the concatenation is a prefix.
            let expected: Vec<String> = (0..flattened.len()).map(|i| format!("p{i}")).collect();
            prop_assert_eq!(flattened, expected);
        }
    }
}
