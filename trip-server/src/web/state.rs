//! Application state for the web layer.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::geo::GeoClient;
use crate::places::PlacesClient;
use crate::store::{AuthClient, StoreClient};

/// Shared application state.
///
/// Contains all the services needed to handle requests. Everything here is
/// immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Process configuration
    pub config: Arc<AppConfig>,

    /// Auth service client
    pub auth: Arc<AuthClient>,

    /// Row-storage client
    pub store: Arc<StoreClient>,

    /// Geocoding client
    pub geo: Arc<GeoClient>,

    /// Places search client
    pub places: Arc<PlacesClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        config: AppConfig,
        auth: AuthClient,
        store: StoreClient,
        geo: GeoClient,
        places: PlacesClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            store: Arc::new(store),
            geo: Arc::new(geo),
            places: Arc::new(places),
        }
    }
}
