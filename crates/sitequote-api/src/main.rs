use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use sitequote_store::memory::MemoryMeasurementStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitequote_api::config::ApiConfig;
use sitequote_api::router::create_router;
use sitequote_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitequote_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();

    tracing::info!(
        port = config.port,
        industry = %config.quote.industry.value,
        "Starting SiteQuote API server"
    );

    let state = AppState::from_config(Arc::new(MemoryMeasurementStore::new()), &config)
        .context("Failed to resolve the template catalog or concrete rules")?;

    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid SITEQUOTE_CORS_ORIGIN: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(Arc::new(state)).layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", config.cors_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
