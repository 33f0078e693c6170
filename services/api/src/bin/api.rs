//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{load_catalog, InMemoryProfileStore},
    config::Config,
    error::ApiError,
    web::{router, state::AppState},
};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use skincare_core::Catalog;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Load the Catalog ---
    let catalog = match &config.catalog_path {
        Some(path) => load_catalog(path).await?,
        None => {
            info!("CATALOG_PATH not set, serving the built-in sample catalog");
            Catalog::sample()
        }
    };
    info!(
        "Catalog ready with {} ingredients and {} products",
        catalog.ingredients().len(),
        catalog.products().len()
    );

    // --- 3. Initialize the Profile Store & Expiry Sweeper ---
    let profiles = Arc::new(InMemoryProfileStore::new(config.session_ttl));
    let sweeper = profiles.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = sweeper.purge_expired().await;
            if purged > 0 {
                debug!("Purged {} expired sessions", purged);
            }
        }
    });

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState {
        catalog: Arc::new(catalog),
        profiles,
        config: config.clone(),
    });

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static(api_lib::web::middleware::SESSION_HEADER),
        ]);

    // --- 5. Create the Web Router ---
    let app = router(app_state).layer(cors);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
