use anyhow::Result;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, debug, trace, error, warn};

use crate::config::{initialize_app_state, AppConfig, ProviderArgs};
use crate::router::create_router;

pub async fn serve(providers: &ProviderArgs, bind_address: &str, static_dir: PathBuf) -> Result<()> {
    trace!("Entering serve function");
    info!("SkyDemand application starting up");
    debug!("Bind address: {}", bind_address);

    let config = match AppConfig::try_from(providers) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize application state
    trace!("Initializing application state");
    let state = initialize_app_state(&config)?;
    debug!("Application state initialized successfully");

    let static_dir = if static_dir.is_dir() {
        info!("Serving dashboard from {}", static_dir.display());
        Some(static_dir)
    } else {
        warn!("Dashboard directory {} not found, serving API only", static_dir.display());
        None
    };

    // Create router
    trace!("Creating application router");
    let app = create_router(state, static_dir);
    debug!("Router created successfully");

    // Start server
    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("SkyDemand API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    trace!("Starting axum server");
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
