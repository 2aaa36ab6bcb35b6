//! Geocoding client.
//!
//! Resolves free-text place names to a canonical city, country code, and
//! coordinates via an external GeoNames-style search API. Takes whatever
//! ranking the upstream returns; "not found" is an absent value, not an
//! error.

mod client;
mod error;

pub use client::{CityMatch, GeoClient, GeoConfig};
pub use error::GeoError;
