//! ontograph-core: Shared types, configuration, and error handling for Ontograph.
//!
//! This crate provides the foundational types used across all Ontograph components:
//! - Node records, triples and degree rows read from the ontology graph
//! - The `Path` value type over node records
//! - Layered configuration (`Settings`)
//! - Common error types

pub mod config;
pub mod error;
pub mod path;
pub mod types;

pub use crate::config::Settings;
pub use error::CoreError;
pub use path::Path;
pub use types::{uri_suffix, LabelQuery, LabelSummary, NodeDegree, NodeRecord, Triple};
