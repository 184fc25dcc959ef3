//! In-memory SQLite test infrastructure

use database::sql::{DatabaseConfig, connect_with_options, run_migrations};
use migration::Migrator;
use sea_orm::DatabaseConnection;

/// Fresh, fully migrated in-memory database.
///
/// Every `TestDatabase` is isolated: an in-memory SQLite database lives
/// exactly as long as its single pooled connection.
pub struct TestDatabase {
    connection: DatabaseConnection,
}

impl TestDatabase {
    /// Create a new test database with migrations applied
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// // Use db.connection() to create your repository
    /// # }
    /// ```
    pub async fn new() -> Self {
        let mut config = DatabaseConfig::new("sqlite::memory:");
        config.max_connections = 1;
        config.min_connections = 1;

        let connection = connect_with_options(config.into_connect_options())
            .await
            .expect("Failed to open in-memory SQLite database");

        run_migrations::<Migrator>(&connection, "test")
            .await
            .expect("Failed to migrate test database");

        Self { connection }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}
