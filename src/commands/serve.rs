//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, API_LOGGER};
use crate::errors::{AppError, AppResult};
use crate::infra::CognitoDirectory;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!(logger = API_LOGGER, "Starting server...");

    let directory = Arc::new(CognitoDirectory::connect(&config.aws_region).await);
    tracing::info!(
        logger = API_LOGGER,
        "Directory client ready for region {}",
        config.aws_region
    );

    let app_state = AppState::from_config(directory, config);

    // Build router
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!(logger = API_LOGGER, "Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
