use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{FlavorService, SeaOrmFlavorService};

mod error;
mod flavors;
mod observability;
mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub flavor_service: Arc<dyn FlavorService>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: Config,
        flavor_service: Arc<dyn FlavorService>,
        prometheus_handle: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            flavor_service,
            start_time: std::time::Instant::now(),
            prometheus_handle,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn flavor_service(&self) -> &Arc<dyn FlavorService> {
        &self.flavor_service
    }
}

/// Opens the database, applies migrations, seeds an empty table and wires the service.
pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;

    if config.database.seed_on_startup {
        let seeded = store.seed_flavors_if_empty().await?;
        if seeded == 0 {
            info!("Flavors table already populated, skipping seed");
        }
    }

    let service: Arc<dyn FlavorService> = Arc::new(SeaOrmFlavorService::new(store));
    Ok(Arc::new(AppState::new(config, service, prometheus_handle)))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route(
            "/flavors",
            get(flavors::list_flavors).post(flavors::create_flavor),
        )
        .route(
            "/flavors/{id}",
            get(flavors::get_flavor)
                .put(flavors::update_flavor)
                .delete(flavors::delete_flavor),
        )
        .route("/system/status", get(system::get_status))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .fallback(not_found)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Route not found")),
    )
}
