//! Output types for export operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::OntologyGraph;
use crate::matrix::SparseMatrix;

/// Statistics about the in-memory graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Triples consumed while building; exceeds `edge_count` when pairs repeat.
    pub triple_count: usize,
}

/// Which matrix to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixKind {
    Adjacency,
    Incidence,
}

/// A matrix together with the vertex order its rows follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixOutput {
    pub kind: MatrixKind,
    pub node_order: Vec<String>,
    #[serde(flatten)]
    pub values: MatrixValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum MatrixValues {
    Dense { rows: Vec<Vec<i8>> },
    Sparse { matrix: SparseMatrix },
}

/// JSON node-link rendering of an [`OntologyGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkDocument {
    pub directed: bool,
    pub generated_at: DateTime<Utc>,
    pub stats: GraphStats,
    pub nodes: Vec<NodeLinkNode>,
    pub links: Vec<NodeLinkEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkNode {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl NodeLinkDocument {
    pub fn from_graph(graph: &OntologyGraph) -> Self {
        Self {
            directed: true,
            generated_at: Utc::now(),
            stats: graph.stats(),
            nodes: graph
                .nodes()
                .map(|id| NodeLinkNode { id: id.to_string() })
                .collect(),
            links: graph
                .edges()
                .map(|(source, target, label)| NodeLinkEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_link_document() {
        let mut graph = OntologyGraph::new();
        graph.add_edge("A", "B", "relatedTo");

        let doc = NodeLinkDocument::from_graph(&graph);
        assert!(doc.directed);
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(
            doc.links,
            vec![NodeLinkEdge {
                source: "A".into(),
                target: "B".into(),
                label: "relatedTo".into()
            }]
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["stats"]["edge_count"], 1);
        assert_eq!(json["links"][0]["label"], "relatedTo");
    }

    #[test]
    fn test_matrix_output_serialization() {
        let output = MatrixOutput {
            kind: MatrixKind::Adjacency,
            node_order: vec!["A".into(), "B".into()],
            values: MatrixValues::Dense {
                rows: vec![vec![0, 1], vec![-1, 0]],
            },
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["kind"], "adjacency");
        assert_eq!(json["format"], "dense");
        assert_eq!(json["rows"][1][0], -1);
    }
}
