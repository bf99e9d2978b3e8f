//! Neo4j connection management and the read-only graph client.

use std::time::Duration;

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Txn};
use ontograph_core::config::Neo4jSettings;

use crate::executor::QueryExecutor;
use crate::queries::CypherQuery;
use crate::record::Record;

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Attempted to query Neo4j without an active database connection")]
    NotConnected,

    #[error("Connection to Neo4j is already active (close it and try again)")]
    ConnectionAlreadyActive,

    #[error("Connection to Neo4j is not currently active")]
    ConnectionInactive,

    #[error("Missing required input: {field}")]
    InvalidInput { field: &'static str },

    #[error("Expected exactly one node with uri {uri}, found {found}")]
    UnexpectedCardinality { uri: String, found: usize },

    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Query exceeded {seconds}s timeout")]
    Timeout { seconds: u64 },

    #[error("Template {template} requires parameter ${param}")]
    UnboundParameter {
        template: &'static str,
        param: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GraphError {
    /// Classify a driver error: socket-level failures are transient, the rest
    /// are reported as query errors unchanged.
    pub fn from_driver(err: neo4rs::Error) -> Self {
        match err {
            neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError { .. } => {
                Self::Connection(err.to_string())
            }
            other => Self::Query(other),
        }
    }

    /// Whether retrying the same read may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout { .. })
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
    /// `None` disables the per-read bound.
    pub query_timeout: Option<Duration>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            max_connections: 16,
            fetch_size: 500,
            query_timeout: Some(Duration::from_secs(300)),
        }
    }
}

impl From<&Neo4jSettings> for GraphConfig {
    fn from(settings: &Neo4jSettings) -> Self {
        Self {
            uri: settings.uri.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            max_connections: settings.max_connections,
            fetch_size: settings.fetch_size,
            query_timeout: (settings.query_timeout_secs > 0)
                .then(|| Duration::from_secs(settings.query_timeout_secs)),
        }
    }
}

/// Neo4j client with connection pooling.
///
/// Every read runs inside its own short-lived transaction which is rolled
/// back once the rows are collected. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    query_timeout: Option<Duration>,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    ///
    /// neo4rs builds its pool lazily, so a `RETURN 1` ping forces the Bolt
    /// handshake and surfaces bad credentials or endpoints here.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self {
            graph,
            query_timeout: config.query_timeout,
        })
    }

    /// Get a reference to the underlying neo4rs Graph for direct operations.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }

    /// Run `query` in a fresh transaction and collect every row.
    ///
    /// The transaction is rolled back on every exit path that reaches it;
    /// a timed-out read drops the transaction, which returns its connection
    /// to the pool.
    pub async fn read_rows(&self, query: &CypherQuery) -> Result<Vec<Record>, GraphError> {
        match self.query_timeout {
            Some(limit) => tokio::time::timeout(limit, self.read_in_txn(query))
                .await
                .map_err(|_| GraphError::Timeout {
                    seconds: limit.as_secs(),
                })?,
            None => self.read_in_txn(query).await,
        }
    }

    async fn read_in_txn(&self, query: &CypherQuery) -> Result<Vec<Record>, GraphError> {
        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(GraphError::from_driver)?;

        let outcome = collect_rows(&mut txn, query).await;

        if let Err(e) = txn.rollback().await {
            tracing::warn!(template = query.template(), error = %e, "Read transaction rollback failed");
        }

        let records = outcome?;
        tracing::debug!(template = query.template(), rows = records.len(), "Read complete");
        Ok(records)
    }
}

async fn collect_rows(txn: &mut Txn, query: &CypherQuery) -> Result<Vec<Record>, GraphError> {
    let mut stream = txn
        .execute(query.to_neo4j())
        .await
        .map_err(GraphError::from_driver)?;

    let mut records = Vec::new();
    while let Some(row) = stream
        .next(txn.handle())
        .await
        .map_err(GraphError::from_driver)?
    {
        records.push(Record::from_row(&row, query.columns())?);
    }
    Ok(records)
}

#[async_trait]
impl QueryExecutor for GraphClient {
    async fn read(&self, query: &CypherQuery) -> Result<Vec<Record>, GraphError> {
        self.read_rows(query).await
    }
}
