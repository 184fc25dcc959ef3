//! Users API - user directory service and its management commands

use axum_helpers::server::create_production_app;
use clap::{Parser, Subcommand};
use core_config::Environment;
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod commands;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[derive(Parser)]
#[command(name = "users-api")]
#[command(about = "User directory service and management commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run migrations and serve HTTP (default)
    Serve,

    /// Drop all tables and recreate the schema
    RecreateDb,

    /// Insert the default users
    SeedDb,

    /// Run the test suite without coverage
    Test,

    /// Run the test suite with coverage
    Cov,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let cli = Cli::parse();
    init_tracing(&Environment::from_env());

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(Config::from_env()?).await,
        Commands::RecreateDb => commands::recreate_db(&Config::from_env()?).await,
        Commands::SeedDb => commands::seed_db(&Config::from_env()?).await,
        Commands::Test => commands::run_tests().await,
        Commands::Cov => commands::coverage().await,
    }
}

async fn serve(config: Config) -> eyre::Result<()> {
    let db = database::sql::connect_from_config_with_retry(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    database::sql::run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState { config, db };
    let app = api::app(&state)?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            match state.db.close().await {
                Ok(_) => info!("Database connection closed successfully"),
                Err(e) => tracing::error!("Error closing database: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
