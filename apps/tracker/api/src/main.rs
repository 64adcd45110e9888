use async_log::AsyncLogger;
use axum_helpers::server::{ShutdownCoordinator, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_tasks::InMemoryTaskRepository;
use std::sync::Arc;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let coordinator = ShutdownCoordinator::default();

    // Exactly one consumer drains the log queue; shutdown cancels it as a backstop.
    let logger = AsyncLogger::new(config.logger.buffer_size);
    let consumer = tokio::spawn({
        let logger = logger.clone();
        let cancelled = coordinator.cancelled();
        async move { logger.run(cancelled).await }
    });

    info!(buffer_size = logger.capacity(), "Async logger started");

    let state = AppState {
        config,
        logger: logger.clone(),
        tasks: Arc::new(InMemoryTaskRepository::new(logger.clone())),
    };

    let app = api::app(state.clone());

    info!("Starting tracker API");
    let served = serve(app, &state.config.server, coordinator).await;

    logger.stop().await;
    consumer
        .await
        .map_err(|e| eyre::eyre!("Log consumer task failed: {}", e))?;

    served.map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tracker API shutdown complete");
    Ok(())
}
