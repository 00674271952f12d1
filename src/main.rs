//! Password administration service - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;

use password_admin::{
    cli::{Cli, Commands},
    commands,
    config::{Config, API_LOGGER},
    utils::logging,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging (verbose mode sets debug level)
    logging::init(cli.verbose);

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(logger = API_LOGGER, "Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(logger = API_LOGGER, ?config, "Configuration loaded");

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!(logger = API_LOGGER, "Command failed: {:?}", e);
        std::process::exit(1);
    }
}
