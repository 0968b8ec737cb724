//! Web Server
//!
//! HTTP delivery of the walkthrough, built with Axum.
//!
//! # Endpoints
//!
//! ## Presentation
//! - `GET /` - Current page
//! - `GET /scene/:index` - Go to a scene (clamped)
//! - `GET /nav/next`, `GET /nav/prev` - Step through scenes
//! - `GET /select?state=NAME` - Change the detail chart's state
//!
//! ## Data
//! - `GET /api/v1/states` - Sorted state names
//! - `GET /api/v1/national` - National totals by date
//! - `GET /api/v1/snapshot` - Per-state totals at the latest date
//! - `GET /api/v1/states/:state/series` - One state's records
//! - `GET /api/v1/scene` - Current scene status
//! - `GET /api/v1/charts/:index` - A scene's chart as SVG
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_scenes::config::ServerConfig;
//! use covid_scenes::dataset::DatasetLoader;
//! use covid_scenes::web::{serve, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let loaded = DatasetLoader::new().load_path("us-states.csv".as_ref());
//!     serve(AppState::from_load(loaded, config)).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{WebError, WebResult};
pub use page::HtmlSurface;
pub use state::{AppState, Presentation};

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let scene_routes = Router::new()
        .route("/", get(routes::scenes::page))
        .route("/scene/:index", get(routes::scenes::goto))
        .route("/nav/next", get(routes::scenes::next))
        .route("/nav/prev", get(routes::scenes::previous))
        .route("/select", get(routes::scenes::select));

    let api_routes = Router::new()
        .route("/states", get(routes::data::list_states))
        .route("/states/:state/series", get(routes::data::series))
        .route("/national", get(routes::data::national))
        .route("/snapshot", get(routes::data::snapshot))
        .route("/scene", get(routes::data::scene_status))
        .route("/charts/:index", get(routes::data::chart_svg));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    scene_routes
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive when no origins are configured, otherwise GET from the listed
/// origins only. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

/// Start the server and run until a shutdown signal arrives
pub async fn serve(state: AppState) -> WebResult<()> {
    let addr = state.config.bind_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("covid-scenes listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("covid-scenes shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
