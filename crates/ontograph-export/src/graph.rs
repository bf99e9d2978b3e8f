//! In-memory directed graph materialized from ontology triples.
//!
//! Vertices are URI suffixes; each edge carries the relation type as its
//! label. The structure is a simple digraph: a second triple between the
//! same (subject, object) pair replaces the label of the existing edge.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use ontograph_core::Triple;

use crate::types::GraphStats;

/// Directed graph of ontology individuals keyed by URI suffix.
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    graph: DiGraph<String, String>,
    /// Map from URI suffix → node index.
    node_index: HashMap<String, NodeIndex>,
    triple_count: usize,
}

impl OntologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from triples in a single pass.
    pub fn from_triples(triples: &[Triple]) -> Self {
        let mut graph = Self::new();
        for triple in triples {
            graph.add_edge(triple.subject.suffix(), triple.object.suffix(), &triple.relation);
        }
        graph
    }

    /// Add (or relabel) the edge `source → target`.
    pub fn add_edge(&mut self, source: &str, target: &str, label: &str) {
        let a = self.ensure_node(source);
        let b = self.ensure_node(target);
        self.graph.update_edge(a, b, label.to_string());
        self.triple_count += 1;
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Number of triples fed into the graph, duplicates included.
    pub fn triple_count(&self) -> usize {
        self.triple_count
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Dense position (0..N-1) of a vertex; matrix rows follow this order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.node_index.get(name).map(|idx| idx.index())
    }

    /// Vertex names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(|idx| self.graph[idx].as_str())
    }

    /// Edges as `(source position, target position, label)` in insertion order.
    pub fn edge_positions(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), e.weight().as_str()))
    }

    /// Edges as `(source, target, label)` names in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                e.weight().as_str(),
            )
        })
    }

    /// Label of the edge `source → target`, if present.
    pub fn edge_label(&self, source: &str, target: &str) -> Option<&str> {
        let a = *self.node_index.get(source)?;
        let b = *self.node_index.get(target)?;
        self.graph
            .find_edge(a, b)
            .map(|e| self.graph[e].as_str())
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            triple_count: self.triple_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontograph_core::NodeRecord;

    fn node(suffix: &str) -> NodeRecord {
        let uri = format!("http://ex.org/onto#{suffix}");
        NodeRecord {
            uri: uri.clone(),
            labels: vec!["owl__NamedIndividual".to_string()],
            properties: serde_json::json!({ "uri": uri }),
        }
    }

    fn triple(s: &str, r: &str, o: &str) -> Triple {
        Triple {
            subject: node(s),
            relation: r.to_string(),
            object: node(o),
        }
    }

    #[test]
    fn test_chain_scenario() {
        let graph = OntologyGraph::from_triples(&[
            triple("A", "relatedTo", "B"),
            triple("B", "relatedTo", "C"),
        ]);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(graph.edge_label("A", "B"), Some("relatedTo"));
        assert_eq!(graph.edge_label("B", "C"), Some("relatedTo"));
        assert_eq!(graph.edge_label("B", "A"), None);
        assert_eq!(graph.edge_label("A", "C"), None);
    }

    #[test]
    fn test_empty_triples_give_empty_graph() {
        let graph = OntologyGraph::from_triples(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.stats().triple_count, 0);
    }

    #[test]
    fn test_duplicate_pair_collapses_to_last_label() {
        let graph = OntologyGraph::from_triples(&[
            triple("A", "inhibits", "B"),
            triple("A", "bindsTo", "B"),
        ]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.triple_count(), 2);
        assert_eq!(graph.edge_label("A", "B"), Some("bindsTo"));
    }

    #[test]
    fn test_reciprocal_edges_are_distinct() {
        let graph = OntologyGraph::from_triples(&[
            triple("A", "relatedTo", "B"),
            triple("B", "relatedTo", "A"),
        ]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_self_loop() {
        let graph = OntologyGraph::from_triples(&[triple("A", "sameAs", "A")]);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_label("A", "A"), Some("sameAs"));
    }

    #[test]
    fn test_positions_follow_insertion_order() {
        let graph = OntologyGraph::from_triples(&[
            triple("X", "r", "Y"),
            triple("Z", "r", "X"),
        ]);
        assert_eq!(graph.position("X"), Some(0));
        assert_eq!(graph.position("Y"), Some(1));
        assert_eq!(graph.position("Z"), Some(2));
        assert_eq!(graph.position("W"), None);
        assert_eq!(
            graph.edge_positions().collect::<Vec<_>>(),
            vec![(0, 1, "r"), (2, 0, "r")]
        );
    }
}
