//! Adjacency and incidence matrices over an [`OntologyGraph`].
//!
//! Rows (and adjacency columns) follow vertex insertion order; incidence
//! columns follow edge insertion order.
//!
//! Adjacency: `(i, j) = +1` when `i → j` exists, `-1` when only `j → i`
//! exists, `0` otherwise. With edges in both directions the outgoing edge
//! wins, so `(i, j) = (j, i) = +1`.
//!
//! Incidence (oriented): column `k` holds `-1` at the source of edge `k` and
//! `+1` at its target. Self-loops leave their column empty.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::graph::OntologyGraph;

/// Sparse matrix in coordinate form, entries sorted by (row, column).
///
/// Deserialized input is checked: entries must be strictly increasing by
/// `(row, column)` and inside the declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SparseParts")]
pub struct SparseMatrix {
    rows: usize,
    cols: usize,
    /// Non-zero `(row, column, value)` triplets.
    entries: Vec<(usize, usize, i8)>,
}

/// Unchecked wire form of [`SparseMatrix`].
#[derive(Deserialize)]
struct SparseParts {
    rows: usize,
    cols: usize,
    entries: Vec<(usize, usize, i8)>,
}

impl TryFrom<SparseParts> for SparseMatrix {
    type Error = String;

    fn try_from(parts: SparseParts) -> Result<Self, Self::Error> {
        let SparseParts {
            rows,
            cols,
            entries,
        } = parts;

        if let Some(&(r, c, _)) = entries.iter().find(|&&(r, c, _)| r >= rows || c >= cols) {
            return Err(format!("entry ({r}, {c}) outside a {rows}x{cols} matrix"));
        }
        if let Some(pair) = entries
            .windows(2)
            .find(|w| (w[0].0, w[0].1) >= (w[1].0, w[1].1))
        {
            return Err(format!(
                "entries not strictly sorted at ({}, {})",
                pair[1].0, pair[1].1
            ));
        }

        Ok(Self {
            rows,
            cols,
            entries,
        })
    }
}

impl SparseMatrix {
    fn from_map(rows: usize, cols: usize, map: BTreeMap<(usize, usize), i8>) -> Self {
        Self {
            rows,
            cols,
            entries: map
                .into_iter()
                .filter(|&(_, v)| v != 0)
                .map(|((r, c), v)| (r, c, v))
                .collect(),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of stored non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Non-zero `(row, column, value)` triplets in `(row, column)` order.
    pub fn entries(&self) -> &[(usize, usize, i8)] {
        &self.entries
    }

    /// Value at `(row, col)`; zero when absent.
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.entries
            .binary_search_by(|&(r, c, _)| (r, c).cmp(&(row, col)))
            .map(|pos| self.entries[pos].2)
            .unwrap_or(0)
    }

    pub fn to_dense(&self) -> Array2<i8> {
        let mut dense = Array2::zeros((self.rows, self.cols));
        for &(r, c, v) in &self.entries {
            dense[[r, c]] = v;
        }
        dense
    }
}

/// Sparse signed adjacency matrix (`n × n`).
pub fn sparse_adjacency(graph: &OntologyGraph) -> SparseMatrix {
    let n = graph.node_count();
    let mut cells: BTreeMap<(usize, usize), i8> = BTreeMap::new();

    for (i, j, _) in graph.edge_positions() {
        cells.insert((i, j), 1);
    }
    for (i, j, _) in graph.edge_positions() {
        cells.entry((j, i)).or_insert(-1);
    }

    SparseMatrix::from_map(n, n, cells)
}

/// Sparse oriented incidence matrix (`n × m`).
pub fn sparse_incidence(graph: &OntologyGraph) -> SparseMatrix {
    let mut cells: BTreeMap<(usize, usize), i8> = BTreeMap::new();

    for (k, (i, j, _)) in graph.edge_positions().enumerate() {
        if i == j {
            continue;
        }
        cells.insert((i, k), -1);
        cells.insert((j, k), 1);
    }

    SparseMatrix::from_map(graph.node_count(), graph.edge_count(), cells)
}

/// Dense signed adjacency matrix (`n × n`).
pub fn adjacency_matrix(graph: &OntologyGraph) -> Array2<i8> {
    sparse_adjacency(graph).to_dense()
}

/// Dense oriented incidence matrix (`n × m`).
pub fn incidence_matrix(graph: &OntologyGraph) -> Array2<i8> {
    sparse_incidence(graph).to_dense()
}

/// Row-major copy of a dense matrix, for JSON output.
pub fn to_rows(matrix: &Array2<i8>) -> Vec<Vec<i8>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}
