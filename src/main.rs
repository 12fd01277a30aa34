use chrono::Local;
use green_track::ai::AiClient;
use green_track::coach::Coach;
use green_track::{initial_data, router, AppState, Config};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();

    let coach = Coach::new(AiClient::from_config(&config.ai)?);
    if coach.is_live() {
        info!("AI feedback enabled with model {}", config.ai.model);
    } else {
        warn!("AI_API_KEY not set, using built-in feedback");
    }

    let today = Local::now().date_naive();
    let data = initial_data(config.data_path.as_deref(), config.seed, today).await;
    let state = AppState::new(config.data_path.clone(), data, coach);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
