//! The read-execution seam and its retry policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::client::GraphError;
use crate::queries::CypherQuery;
use crate::record::Record;

/// Runs one read query in its own scoped transaction.
///
/// Implementations must release whatever session they acquire before
/// returning, whether the read succeeds, yields no rows, or fails.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn read(&self, query: &CypherQuery) -> Result<Vec<Record>, GraphError>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Arc<E> {
    async fn read(&self, query: &CypherQuery) -> Result<Vec<Record>, GraphError> {
        (**self).read(query).await
    }
}

/// Bounded retry for transient failures (dropped sockets, timeouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before retry `n` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Execute `query`, retrying transient failures up to `max_retries` times.
    ///
    /// Non-transient errors are returned on first occurrence; when retries
    /// run out the last transient error is returned unchanged.
    pub async fn read<E>(&self, executor: &E, query: &CypherQuery) -> Result<Vec<Record>, GraphError>
    where
        E: QueryExecutor + ?Sized,
    {
        let mut attempt = 0;
        loop {
            match executor.read(query).await {
                Ok(records) => return Ok(records),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        template = query.template(),
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "Transient read failure, retrying"
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
