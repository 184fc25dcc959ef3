//! SeaORM connection management, migrations and health checks.

mod config;
mod connector;
mod health;

pub use config::DatabaseConfig;
pub use connector::{
    connect, connect_from_config_with_retry, connect_with_options, recreate_schema,
    run_migrations,
};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
