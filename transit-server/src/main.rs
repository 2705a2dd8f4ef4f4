use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use transit_server::model::{DEFAULT_MODEL_PATH, ModelStore, ModelStoreConfig};
use transit_server::recommend::{Recommender, ScoringConfig};
use transit_server::routing::{FixtureRouteProvider, OrsClient, OrsConfig, RouteSource};
use transit_server::web::{AppState, create_router};

/// Address to listen on when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fixtures replace the live API for offline development
    let routes = match std::env::var("ROUTE_FIXTURES") {
        Ok(path) => {
            let fixtures = FixtureRouteProvider::load(&path)?;
            info!(%path, routes = fixtures.len(), "serving routes from fixtures");
            RouteSource::from(fixtures)
        }
        Err(_) => {
            let api_key = std::env::var("ORS_API_KEY").unwrap_or_else(|_| {
                warn!("ORS_API_KEY not set, every trip will use fallback estimates");
                String::new()
            });
            let mut config = OrsConfig::new(api_key);
            if let Ok(url) = std::env::var("ORS_BASE_URL") {
                config = config.with_base_url(url);
            }
            RouteSource::from(OrsClient::new(config)?)
        }
    };

    // Model store
    let model_path =
        std::env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string());
    let cache_enabled = std::env::var("MODEL_CACHE")
        .map(|v| !v.eq_ignore_ascii_case("off"))
        .unwrap_or(true);
    let models = ModelStore::new(ModelStoreConfig::new(&model_path).with_cache(cache_enabled));
    match models.load().await {
        Ok(model) => info!(
            path = %model_path,
            samples = ?model.metadata.training_samples,
            "scoring model available"
        ),
        Err(e) => warn!(error = %e, "scoring model unavailable, rule-based scoring only"),
    }

    let recommender = Recommender::new(routes, models, ScoringConfig::default());
    let app = create_router(AppState::new(recommender));

    // Bind and serve
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;
    info!("transit recommender listening on http://{addr}");
    info!("  GET  /health");
    info!("  GET  /api/recommendations");
    info!("  POST /api/recommendations");
    info!("  GET  /api/route");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
