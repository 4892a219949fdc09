use crate::config::Settings;
use crate::core::fetcher::AggregatingFetcher;
use anyhow::Context;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod health;
pub mod property;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: AggregatingFetcher,
}

impl AppState {
    pub fn new(fetcher: AggregatingFetcher) -> Self {
        Self { fetcher }
    }
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api", property::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn setup_and_serve(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let address = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(
        "Server started on port {} (catalog: {})",
        settings.server.port,
        settings.catalog.base_url
    );

    axum::serve(listener, api_router(state))
        .await
        .context("error starting service")
}
