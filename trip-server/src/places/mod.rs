//! Places API client.
//!
//! Lists nearby points of interest for a city via an external places search
//! API. Authentication is a bearer key plus a pinned API version header;
//! category filters use the upstream's numeric category ids.

mod client;
mod error;
mod types;

pub use client::{ATTRACTIONS_CATEGORY, PlacesClient, PlacesConfig};
pub use error::PlacesError;
pub use types::{Place, PlaceCategory, PlacesResponse};
