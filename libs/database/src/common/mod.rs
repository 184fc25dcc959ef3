//! Utilities shared by the connectors

pub mod error;
pub mod retry;

pub use error::DatabaseError;
pub use retry::{Backoff, is_transient, retry_transient};
