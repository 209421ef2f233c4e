// Repository trait for query engine access

use crate::domain::table::Table;
use async_trait::async_trait;
use thiserror::Error;

/// Failure taxonomy for a fetch. Every variant is recoverable from the
/// refresh loop's point of view; the distinction drives log level and the
/// message surfaced to the operator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Broker unreachable or transport failure. Transient; retried on the
    /// next tick.
    #[error("failed to reach the query engine: {0}")]
    Connection(String),

    /// The engine rejected the query or reported an exception. The queries
    /// are static, so this indicates a schema or deployment mismatch.
    #[error("query engine error: {0}")]
    Engine(String),

    /// The response body did not match the broker wire shape.
    #[error("could not decode query engine response: {0}")]
    Decode(String),
}

impl QueryError {
    /// Transient failures are expected between ticks; the rest point at a
    /// configuration problem the operator has to fix.
    pub fn is_transient(&self) -> bool {
        matches!(self, QueryError::Connection(_))
    }
}

#[async_trait]
pub trait QueryRepository: Send + Sync {
    /// Execute a SQL statement and materialize the full result.
    async fn fetch_table(&self, sql: &str) -> Result<Table, QueryError>;
}
