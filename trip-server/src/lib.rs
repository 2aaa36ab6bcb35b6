//! Trip-planning REST backend.
//!
//! A JSON API for planning and sharing trips: users create trips, add
//! ordered stops and activities, and auto-generate day-wise itineraries
//! from nearby points of interest. Persistence and authentication are
//! delegated to a managed backend; place data comes from external
//! geocoding and places APIs.

pub mod config;
pub mod geo;
pub mod places;
pub mod planner;
pub mod store;
pub mod web;
