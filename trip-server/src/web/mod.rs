//! Web layer for the trip-planning API.
//!
//! Provides the JSON endpoints for auth, trips, profiles, itineraries,
//! search, and saved day plans.

mod authz;
mod dto;
mod error;
mod extract;
mod routes;
mod state;

pub use dto::*;
pub use error::ApiError;
pub use extract::CurrentUser;
pub use routes::create_router;
pub use state::AppState;
