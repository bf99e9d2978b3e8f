//! Ontograph Graph — Neo4j read access for ontology knowledge graphs.
//!
//! All graph reads flow through a [`QueryExecutor`]; [`GraphClient`] is the
//! Neo4j implementation. [`GraphAccessor`] turns raw rows into domain values
//! and owns the connection lifecycle.

pub mod accessor;
pub mod client;
pub mod connection;
pub mod executor;
pub mod queries;
pub mod record;

pub use accessor::{AccessorOptions, GraphAccessor};
pub use client::{GraphClient, GraphConfig, GraphError};
pub use connection::Connection;
pub use executor::{QueryExecutor, RetryPolicy};
pub use queries::{CypherQuery, ParamValue, QueryTemplate};
pub use record::Record;
