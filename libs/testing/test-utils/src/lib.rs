//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: migrated in-memory SQLite database (always available)
//! - `PostgresTestDatabase`: PostgreSQL container with automatic cleanup (feature: "postgres")
//! - `TestDataBuilder`: Deterministic test data generation
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let username = builder.username("main");
//!     let email = builder.email("main");
//! }
//! ```

mod sqlite;

#[cfg(feature = "postgres")]
mod postgres;

pub use sqlite::TestDatabase;

#[cfg(feature = "postgres")]
pub use postgres::PostgresTestDatabase;

/// Builder for test data with deterministic values
///
/// The same test name always yields the same usernames and emails, and
/// different test names yield different ones.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_add_user");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Username unique to this builder and `suffix`
    pub fn username(&self, suffix: &str) -> String {
        format!("user-{}-{}", self.seed % 100_000, suffix)
    }

    /// Email address unique to this builder and `suffix`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.email("main"), "user-7-main@upeu.edu.pe");
    /// ```
    pub fn email(&self, suffix: &str) -> String {
        format!("{}@upeu.edu.pe", self.username(suffix))
    }
}
