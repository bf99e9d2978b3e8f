//! Ordered node sequences through the ontology graph.

use std::fmt;

use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::types::NodeRecord;

/// A non-empty, immutable sequence of nodes representing a directed path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    nodes: Vec<NodeRecord>,
}

impl Path {
    /// Build a path; fails with `CoreError::InvalidPath` when `nodes` is empty.
    pub fn new(nodes: Vec<NodeRecord>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(CoreError::InvalidPath);
        }
        Ok(Self { nodes })
    }

    /// First node of the path.
    pub fn start(&self) -> &NodeRecord {
        &self.nodes[0]
    }

    /// Last node of the path.
    pub fn end(&self) -> &NodeRecord {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeRecord> {
        self.nodes.iter()
    }

    /// URIs of the nodes, in path order.
    pub fn uri_sequence(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.uri.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a NodeRecord;
    type IntoIter = std::slice::Iter<'a, NodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffixes: Vec<&str> = self.nodes.iter().map(NodeRecord::suffix).collect();
        write!(f, "Path[{}]", suffixes.join(" -> "))
    }
}
