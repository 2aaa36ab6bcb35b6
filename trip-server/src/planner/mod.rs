//! Trip-planning core.
//!
//! The small amount of genuine logic in this service lives here, kept pure
//! so it can be tested without any upstream calls: the category cost
//! heuristic, the ordered-child sequencer, and the day-wise itinerary
//! builder.

mod cost;
mod itinerary;
mod order;

pub use cost::estimate_cost;
pub use itinerary::{
    DayPlan, ItineraryError, MAX_PLACES_LIMIT, POIS_PER_DAY, PlannedPlace, build_days, day_count,
    place_fetch_limit,
};
pub use order::{ACTIVITY_ORDER_BASE, STOP_ORDER_BASE, next_order};
