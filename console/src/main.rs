use anyhow::Context;
use movies_core::Event;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movies_console::{router, AppState, ConsoleConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movies_console=debug,movies_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ConsoleConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, fetch_size = config.fetch_size, "Loaded console configuration");

    // --- Initial table load ---
    let state = AppState::new(&config);
    state.dispatch(vec![Event::RefreshRequested]).await?;
    tracing::info!(movies = state.snapshot().await.table.rows().len(), "Initial movie list loaded");

    let app = router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Starting console on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
