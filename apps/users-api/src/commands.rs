//! Management commands run from the CLI instead of the HTTP server.

use domain_users::{SqlUserRepository, UserService};
use migration::Migrator;
use sea_orm::DatabaseConnection;
use tokio::process::Command;
use tracing::info;

use crate::config::Config;

async fn connect(config: &Config) -> eyre::Result<DatabaseConnection> {
    database::sql::connect_from_config_with_retry(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))
}

/// Drop every table and rebuild the schema from the migrations
pub async fn recreate_db(config: &Config) -> eyre::Result<()> {
    let db = connect(config).await?;
    database::sql::recreate_schema::<Migrator>(&db).await?;
    db.close().await?;
    Ok(())
}

/// Insert the default users in one transaction
pub async fn seed_db(config: &Config) -> eyre::Result<()> {
    let db = connect(config).await?;
    database::sql::run_migrations::<Migrator>(&db, config.app.name).await?;

    let service = UserService::new(SqlUserRepository::new(db.clone()));
    let seeded = service.seed().await?;
    info!(count = seeded.len(), "Database seeded");

    db.close().await?;
    Ok(())
}

/// `cargo test --workspace`
pub async fn run_tests() -> eyre::Result<()> {
    cargo(&["test", "--workspace"]).await
}

/// `cargo llvm-cov --workspace`, printing a summary and writing an HTML report
pub async fn coverage() -> eyre::Result<()> {
    cargo(&["llvm-cov", "--workspace", "--html"]).await?;
    cargo(&["llvm-cov", "report", "--summary-only"]).await
}

/// Run a cargo subcommand with inherited stdio; a non-zero exit is an error.
async fn cargo(args: &[&str]) -> eyre::Result<()> {
    let program = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    info!("Running {} {}", program, args.join(" "));

    let status = Command::new(&program).args(args).status().await?;
    if !status.success() {
        eyre::bail!("`cargo {}` failed with {}", args.join(" "), status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cargo_reports_failure_status() {
        // An unknown subcommand makes cargo exit non-zero
        let result = cargo(&["definitely-not-a-cargo-subcommand"]).await;
        assert!(result.is_err());
    }
}
