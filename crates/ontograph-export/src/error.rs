//! Error types for the ontograph-export crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Graph error: {0}")]
    Graph(#[from] ontograph_graph::GraphError),

    #[error("GraphML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
