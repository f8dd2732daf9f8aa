use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use movie_recommender::api::{create_router, AppState, Settings};
use movie_recommender::config::Config;
use movie_recommender::store::{SnapshotCache, SnapshotPaths};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Load eagerly so a broken deployment shows up in the logs at startup.
    // The server still starts and answers 503 until it is fixed and restarted.
    let cache = SnapshotCache::new(SnapshotPaths::from(&config));
    if let Err(e) = cache.get() {
        tracing::error!(
            error = %e,
            catalog = %config.catalog_path,
            similarity = %config.similarity_path,
            "Unable to load movie data, serving error responses only"
        );
    }

    let state = AppState::new(cache, Settings::from(&config));
    state.spawn_session_sweeper(config.session_sweep_interval());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
