use tokio::net::TcpListener;
use tracing::info;

use trip_server::config::AppConfig;
use trip_server::geo::{GeoClient, GeoConfig};
use trip_server::places::{PlacesClient, PlacesConfig};
use trip_server::store::{AuthClient, StoreClient, StoreConfig};
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let store_config = StoreConfig::new(
        config.supabase_url.clone(),
        config.supabase_key.clone(),
        config.supabase_service_key.clone(),
    );
    let auth = AuthClient::new(&store_config)?;
    let store = StoreClient::new(&store_config)?;

    let geo = GeoClient::new(
        GeoConfig::new(config.geonames_username.clone())
            .with_base_url(config.geonames_base_url.clone()),
    )?;
    let places = PlacesClient::new(
        PlacesConfig::new(
            config.places_api_key.clone(),
            config.places_api_version.clone(),
        )
        .with_base_url(config.places_base_url.clone()),
    )?;

    let listen_addr = config.listen_addr;
    let state = AppState::new(config, auth, store, geo, places);
    let app = create_router(state);

    let listener = TcpListener::bind(listen_addr).await?;
    info!("trip-server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,trip_server=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
