use std::net::SocketAddr;
use std::sync::Arc;

use aerosearch_api::{app, worker, AppState};
use aerosearch_engine::{EngineConfig, FlightAggregator, ResultCache};
use aerosearch_providers::{build_providers, Config};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "aerosearch_api=debug,aerosearch_engine=debug,aerosearch_providers=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting AeroSearch API on port {}", config.server.port);

    let providers = build_providers(&config.providers);
    tracing::info!(
        "Registered {} provider(s) reading from {}",
        providers.len(),
        config.providers.mock_dir.display()
    );

    let cache = Arc::new(ResultCache::new(config.cache.ttl()));
    let sweeper = worker::spawn_cache_sweeper(cache.clone(), config.cache.sweep_interval());

    let aggregator = FlightAggregator::new(
        providers,
        cache,
        EngineConfig {
            provider_timeout: config.providers.timeout(),
        },
    );
    let app = app(AppState::new(aggregator));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    sweeper.abort();
    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
    tracing::info!("Shutdown signal received");
}
