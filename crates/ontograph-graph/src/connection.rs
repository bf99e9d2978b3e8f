//! Connection lifecycle around a query executor.

use crate::client::{GraphClient, GraphConfig, GraphError};
use crate::executor::QueryExecutor;

/// A connected or disconnected handle to the graph database.
///
/// Queries may only run while connected; dropping the connection releases
/// the executor (and, for Neo4j, its connection pool).
pub struct Connection<E> {
    executor: Option<E>,
}

impl<E: QueryExecutor> Connection<E> {
    /// A connection already bound to `executor`.
    pub fn with_executor(executor: E) -> Self {
        Self {
            executor: Some(executor),
        }
    }

    /// A connection with nothing attached.
    pub fn disconnected() -> Self {
        Self { executor: None }
    }

    pub fn is_connected(&self) -> bool {
        self.executor.is_some()
    }

    /// Attach an executor. Refuses when one is already active.
    pub fn attach(&mut self, executor: E) -> Result<(), GraphError> {
        self.ensure_disconnected()?;
        self.executor = Some(executor);
        Ok(())
    }

    /// `ConnectionAlreadyActive` when an executor is attached.
    fn ensure_disconnected(&self) -> Result<(), GraphError> {
        if self.is_connected() {
            tracing::warn!("Connection to Neo4j is already active; close it first");
            return Err(GraphError::ConnectionAlreadyActive);
        }
        Ok(())
    }

    /// Release the active executor.
    ///
    /// Closing an inactive connection reports `ConnectionInactive`.
    pub fn close(&mut self) -> Result<(), GraphError> {
        match self.executor.take() {
            Some(_) => {
                tracing::info!("Connection to Neo4j closed");
                Ok(())
            }
            None => {
                tracing::warn!("Connection to Neo4j is not currently active");
                Err(GraphError::ConnectionInactive)
            }
        }
    }

    /// The active executor, or `NotConnected`.
    pub fn executor(&self) -> Result<&E, GraphError> {
        self.executor.as_ref().ok_or(GraphError::NotConnected)
    }
}

impl Connection<GraphClient> {
    /// Open a Neo4j connection. Refuses when one is already active.
    pub async fn open(&mut self, config: &GraphConfig) -> Result<(), GraphError> {
        self.ensure_disconnected()?;
        let client = GraphClient::connect(config).await?;
        self.executor = Some(client);
        Ok(())
    }

    /// Connect and return a new handle in one step.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        Ok(Self::with_executor(GraphClient::connect(config).await?))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::queries::CypherQuery;
    use crate::record::Record;

    struct Noop;

    #[async_trait]
    impl QueryExecutor for Noop {
        async fn read(&self, _query: &CypherQuery) -> Result<Vec<Record>, GraphError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut conn = Connection::disconnected();
        assert!(!conn.is_connected());
        assert!(matches!(conn.executor(), Err(GraphError::NotConnected)));

        conn.attach(Noop).unwrap();
        assert!(conn.is_connected());
        assert!(conn.executor().is_ok());

        conn.close().unwrap();
        assert!(!conn.is_connected());
    }

    #[test]
    fn test_attach_while_active_refused() {
        let mut conn = Connection::with_executor(Noop);
        assert!(matches!(
            conn.attach(Noop),
            Err(GraphError::ConnectionAlreadyActive)
        ));
        assert!(conn.is_connected());
    }

    #[test]
    fn test_ensure_disconnected() {
        let mut conn = Connection::with_executor(Noop);
        assert!(matches!(
            conn.ensure_disconnected(),
            Err(GraphError::ConnectionAlreadyActive)
        ));

        conn.close().unwrap();
        assert!(conn.ensure_disconnected().is_ok());
    }

    #[test]
    fn test_close_inactive_reports_error() {
        let mut conn: Connection<Noop> = Connection::disconnected();
        assert!(matches!(conn.close(), Err(GraphError::ConnectionInactive)));

        let mut conn = Connection::with_executor(Noop);
        conn.close().unwrap();
        assert!(matches!(conn.close(), Err(GraphError::ConnectionInactive)));
    }
}
