use anyhow::Context;

use pong_server::{config::ServerConfig, routes, services::spawn_tick_loop, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    // Override with RUST_LOG, e.g. RUST_LOG=pong_server=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pong_server=info,tower_http=warn".into()),
        )
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(
        "Pong server starting: field {}x{}, tick every {} ms",
        config.game_width,
        config.game_height,
        config.tick_interval.as_millis()
    );

    let state = AppState::new(config.clone());

    let ticker = spawn_tick_loop(state.hub.clone(), config.tick_interval);

    let app = routes::router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    ticker.abort();
    tracing::info!("Shutting down game server...");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
