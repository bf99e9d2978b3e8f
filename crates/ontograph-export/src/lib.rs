//! ontograph-export: Graph export for ontology knowledge graphs.
//!
//! Fetches all triples between named individuals through a
//! [`GraphAccessor`], materializes them into an in-memory directed graph,
//! and derives adjacency/incidence matrices, GraphML, and JSON node-link
//! documents from it.

pub mod error;
pub mod fetch;
pub mod graph;
pub mod graphml;
pub mod matrix;
pub mod progress;
pub mod types;

pub use error::ExportError;
pub use fetch::ProgressOptions;
pub use graph::OntologyGraph;
pub use matrix::SparseMatrix;
pub use types::{GraphStats, MatrixKind, MatrixOutput, MatrixValues, NodeLinkDocument};

use std::io::Write;

use ontograph_graph::{GraphAccessor, QueryExecutor};

/// Export engine over a graph accessor.
pub struct GraphExporter<E> {
    accessor: GraphAccessor<E>,
    progress: ProgressOptions,
}

impl<E: QueryExecutor> GraphExporter<E> {
    /// Create an exporter with the spinner disabled.
    pub fn new(accessor: GraphAccessor<E>) -> Self {
        Self {
            accessor,
            progress: ProgressOptions::default(),
        }
    }

    /// Set console progress behavior for long fetches.
    pub fn with_progress(mut self, progress: ProgressOptions) -> Self {
        self.progress = progress;
        self
    }

    pub fn accessor(&self) -> &GraphAccessor<E> {
        &self.accessor
    }

    pub fn accessor_mut(&mut self) -> &mut GraphAccessor<E> {
        &mut self.accessor
    }

    /// Fetch all triples and build the directed graph in one pass.
    ///
    /// An empty database yields an empty graph.
    pub async fn materialize_graph(&self) -> error::Result<OntologyGraph> {
        let triples = fetch::fetch_all_triples(&self.accessor, self.progress).await?;
        let graph = OntologyGraph::from_triples(&triples);
        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            triples = graph.triple_count(),
            "Materialized graph"
        );
        Ok(graph)
    }

    /// Signed adjacency matrix of the materialized graph.
    pub async fn build_adjacency_matrix(&self, sparse: bool) -> error::Result<MatrixOutput> {
        let graph = self.materialize_graph().await?;
        Ok(build_matrix(&graph, MatrixKind::Adjacency, sparse))
    }

    /// Oriented incidence matrix of the materialized graph.
    pub async fn build_incidence_matrix(&self, sparse: bool) -> error::Result<MatrixOutput> {
        let graph = self.materialize_graph().await?;
        Ok(build_matrix(&graph, MatrixKind::Incidence, sparse))
    }

    /// Materialize and write GraphML to `out`.
    pub async fn export_graphml<W: Write>(&self, out: W) -> error::Result<GraphStats> {
        let graph = self.materialize_graph().await?;
        graphml::write_graphml(&graph, out)?;
        Ok(graph.stats())
    }

    /// Materialize and render a node-link document.
    pub async fn export_node_link(&self) -> error::Result<NodeLinkDocument> {
        let graph = self.materialize_graph().await?;
        Ok(NodeLinkDocument::from_graph(&graph))
    }
}

/// Build a matrix of `kind` over `graph`.
pub fn build_matrix(graph: &OntologyGraph, kind: MatrixKind, sparse: bool) -> MatrixOutput {
    let values = match (kind, sparse) {
        (MatrixKind::Adjacency, true) => MatrixValues::Sparse {
            matrix: matrix::sparse_adjacency(graph),
        },
        (MatrixKind::Incidence, true) => MatrixValues::Sparse {
            matrix: matrix::sparse_incidence(graph),
        },
        (MatrixKind::Adjacency, false) => MatrixValues::Dense {
            rows: matrix::to_rows(&matrix::adjacency_matrix(graph)),
        },
        (MatrixKind::Incidence, false) => MatrixValues::Dense {
            rows: matrix::to_rows(&matrix::incidence_matrix(graph)),
        },
    };

    MatrixOutput {
        kind,
        node_order: graph.nodes().map(str::to_string).collect(),
        values,
    }
}
