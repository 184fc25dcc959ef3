use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::DatabaseConfig;
use crate::common::retry_transient;

/// Connect with default pool settings.
///
/// ```ignore
/// let db = database::sql::connect("sqlite::memory:").await?;
/// ```
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(DatabaseConfig::new(database_url).into_connect_options()).await
}

/// Connect with explicit connection options.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Connected to database");
    Ok(db)
}

/// Connect from config, retrying with exponential backoff while the server
/// is unreachable.
///
/// Intended for startup, where the database may come up after the service.
/// Configuration mistakes such as an unknown URL scheme fail immediately.
pub async fn connect_from_config_with_retry(
    config: DatabaseConfig,
) -> Result<DatabaseConnection, DbErr> {
    info!(url = %config.redacted_url(), "Connecting to database");

    let backoff = config.backoff();
    let options = config.into_connect_options();

    retry_transient(|| connect_with_options(options.clone()), backoff).await
}

/// Apply every pending migration of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!("Running {} database migrations...", app_name);
    M::up(db, None).await?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

/// Drop every table and re-apply all migrations of `M` from scratch.
pub async fn recreate_schema<M: MigratorTrait>(db: &DatabaseConnection) -> Result<(), DbErr> {
    info!("Dropping all tables and re-applying migrations");
    M::fresh(db).await?;
    info!("Schema recreated");
    Ok(())
}
