use sea_orm::{DbErr, RuntimeErr};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Delay schedule for startup connection attempts.
///
/// The wait doubles after every failed attempt, starting at `initial` and
/// never exceeding `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Attempts allowed after the first one
    pub retries: u32,
    pub initial: Duration,
    pub max: Duration,
}

impl Backoff {
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            initial: Duration::from_millis(200),
            max: Duration::from_secs(5),
        }
    }

    /// Wait before retry number `n`, counting from zero.
    pub fn delay(&self, n: u32) -> Duration {
        self.initial.saturating_mul(2u32.saturating_pow(n)).min(self.max)
    }
}

/// Whether `err` says the server could not be reached yet.
///
/// Driver-level connection failures and pool acquire timeouts qualify.
/// Errors raised before any I/O (unknown URL scheme, bad options) do not.
pub fn is_transient(err: &DbErr) -> bool {
    matches!(err, DbErr::ConnectionAcquire(_) | DbErr::Conn(RuntimeErr::SqlxError(_)))
}

/// Run `connect` until it succeeds, fails with a non-transient error, or the
/// retries in `backoff` are used up.
pub async fn retry_transient<F, Fut, T>(mut connect: F, backoff: Backoff) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut retry = 0;

    loop {
        match connect().await {
            Ok(value) => return Ok(value),
            Err(err) if retry < backoff.retries && is_transient(&err) => {
                let wait = backoff.delay(retry);
                retry += 1;
                warn!(
                    retry,
                    retries = backoff.retries,
                    wait_ms = wait.as_millis() as u64,
                    error = %err,
                    "Database unreachable, retrying"
                );
                tokio::time::sleep(wait).await;
            }
            Err(err) => return Err(err),
        }
    }
}
