/// Errors raised by the connector helpers themselves
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The pool could not reach the database
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}
