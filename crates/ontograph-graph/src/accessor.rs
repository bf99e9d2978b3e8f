//! Retrieval operations over the ontology graph.
//!
//! Each operation binds its own query, runs it through the connection's
//! executor and reshapes the rows. "No data" is reported as `None`, never as
//! an error; missing identifiers are rejected before any query runs.

use std::collections::BTreeMap;

use ontograph_core::config::{OntologySettings, RetrySettings};
use ontograph_core::{LabelQuery, LabelSummary, NodeDegree, NodeRecord, Triple};

use crate::client::GraphError;
use crate::connection::Connection;
use crate::executor::{QueryExecutor, RetryPolicy};
use crate::queries::{
    CypherQuery, FETCH_ALL_NODE_DEGREES, FETCH_ALL_TRIPLES, FETCH_INDIVIDUAL_NODE_BY_URI,
    FETCH_NEIGHBORS_BY_URI, FETCH_NODES_BY_LABEL, FETCH_NODE_DEGREES_FOR_CLASS,
    NODE_COUNTS_BY_LABEL,
};
use crate::record::Record;

/// How the accessor interprets ontology labels.
#[derive(Debug, Clone)]
pub struct AccessorOptions {
    /// Labels restricting the node set; empty means no filter.
    pub node_mask: Vec<String>,
    /// Class label namespace (`ns0` → `ns0__Chemical`).
    pub namespace_prefix: String,
    /// Label carried by every ontology individual.
    pub named_individual_label: String,
    pub retry: RetryPolicy,
}

impl Default for AccessorOptions {
    fn default() -> Self {
        Self::from_settings(&OntologySettings::default(), &RetrySettings::default())
    }
}

impl AccessorOptions {
    pub fn from_settings(ontology: &OntologySettings, retry: &RetrySettings) -> Self {
        Self {
            node_mask: ontology.node_mask.clone(),
            namespace_prefix: ontology.namespace_prefix.clone(),
            named_individual_label: ontology.named_individual_label.clone(),
            retry: RetryPolicy {
                max_retries: retry.max_retries,
                backoff: std::time::Duration::from_millis(retry.backoff_ms),
            },
        }
    }

    /// Qualify a bare class name with the namespace prefix.
    ///
    /// Names that already contain `__` are taken as full labels.
    pub fn class_label(&self, class: &str) -> String {
        if class.contains("__") {
            class.to_string()
        } else {
            format!("{}__{}", self.namespace_prefix, class)
        }
    }
}

/// Convenience layer over a graph database connection.
pub struct GraphAccessor<E> {
    connection: Connection<E>,
    options: AccessorOptions,
}

impl<E: QueryExecutor> GraphAccessor<E> {
    pub fn new(connection: Connection<E>, options: AccessorOptions) -> Self {
        Self {
            connection,
            options,
        }
    }

    pub fn connection(&self) -> &Connection<E> {
        &self.connection
    }

    /// Mutable access for lifecycle calls (`open`, `close`, `attach`).
    pub fn connection_mut(&mut self) -> &mut Connection<E> {
        &mut self.connection
    }

    pub fn options(&self) -> &AccessorOptions {
        &self.options
    }

    // ── Label and degree summaries ───────────────────────────────

    /// Ontology classes present in the graph, with individual counts.
    ///
    /// Label groups with a zero count or without the named-individual label
    /// are skipped, so only populated classes are ever reported.
    pub async fn fetch_class_labels(&self, request: LabelQuery) -> Result<LabelSummary, GraphError> {
        if !request.populated_only {
            tracing::debug!("Class enumeration always reports populated classes only");
        }

        let rows = self.run(NODE_COUNTS_BY_LABEL.bind()).await?;
        let counts = self.tally_classes(&rows)?;

        tracing::debug!(groups = rows.len(), classes = counts.len(), "Class labels fetched");

        if request.include_counts {
            Ok(LabelSummary::Counts(counts))
        } else {
            Ok(LabelSummary::Labels(counts.into_keys().collect()))
        }
    }

    /// Degree of every node, or of every node of one class.
    ///
    /// Returns `None` when the query yields no rows.
    pub async fn fetch_node_degrees(
        &self,
        node_type: Option<&str>,
    ) -> Result<Option<Vec<NodeDegree>>, GraphError> {
        let query = match node_type {
            Some(class) => {
                let class = required(class, "node_type")?;
                FETCH_NODE_DEGREES_FOR_CLASS
                    .bind()
                    .param("label", self.options.class_label(class))
            }
            None => FETCH_ALL_NODE_DEGREES
                .bind()
                .param("named_individual", self.options.named_individual_label.clone())
                .param("node_mask", self.options.node_mask.clone()),
        };

        let rows = self.run(query).await?;
        if rows.is_empty() {
            return Ok(None);
        }

        rows.iter()
            .map(|row| {
                Ok(NodeDegree {
                    uri: row.get_str("uri")?.to_string(),
                    degree: row.get_i64("degree")?,
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()
            .map(Some)
    }

    // ── Node lookups ─────────────────────────────────────────────

    /// The node with `uri`, or `None` if no node has it.
    ///
    /// More than one match is a data invariant violation and fails with
    /// `UnexpectedCardinality`.
    pub async fn fetch_node_by_uri(&self, uri: &str) -> Result<Option<NodeRecord>, GraphError> {
        let uri = required(uri, "uri")?;
        let mut rows = self
            .run(FETCH_INDIVIDUAL_NODE_BY_URI.bind().param("uri", uri))
            .await?;

        match rows.len() {
            0 => Ok(None),
            1 => {
                let row = rows.remove(0);
                Ok(Some(row.get_node("node", "labels")?))
            }
            found => {
                tracing::error!(uri = %uri, found, "Multiple nodes share one uri");
                Err(GraphError::UnexpectedCardinality {
                    uri: uri.to_string(),
                    found,
                })
            }
        }
    }

    /// Every node carrying the class `label` (bare class name or full label).
    pub async fn fetch_nodes_by_label(&self, label: &str) -> Result<Vec<NodeRecord>, GraphError> {
        let label = required(label, "label")?;
        let rows = self
            .run(
                FETCH_NODES_BY_LABEL
                    .bind()
                    .param("label", self.options.class_label(label)),
            )
            .await?;
        nodes_from(&rows)
    }

    /// Nodes adjacent to the node with `uri`, or `None` if there are none.
    pub async fn fetch_neighbors_by_uri(
        &self,
        uri: &str,
    ) -> Result<Option<Vec<NodeRecord>>, GraphError> {
        let uri = required(uri, "uri")?;
        let rows = self
            .run(FETCH_NEIGHBORS_BY_URI.bind().param("uri", uri))
            .await?;
        if rows.is_empty() {
            return Ok(None);
        }
        nodes_from(&rows).map(Some)
    }

    // ── Export ───────────────────────────────────────────────────

    /// Every relationship between two named individuals.
    pub async fn fetch_all_triples(&self) -> Result<Vec<Triple>, GraphError> {
        let rows = self
            .run(
                FETCH_ALL_TRIPLES
                    .bind()
                    .param("named_individual", self.options.named_individual_label.clone()),
            )
            .await?;

        rows.iter()
            .map(|row| {
                Ok(Triple {
                    subject: row.get_node("subject", "subject_labels")?,
                    relation: row.get_str("relation")?.to_string(),
                    object: row.get_node("object", "object_labels")?,
                })
            })
            .collect()
    }

    // ── Internals ────────────────────────────────────────────────

    async fn run(&self, query: CypherQuery) -> Result<Vec<Record>, GraphError> {
        query.validate()?;
        let executor = self.connection.executor()?;
        self.options.retry.read(executor, &query).await
    }

    /// Sum label-group counts per class suffix.
    ///
    /// Groups with a non-positive count or without the named-individual label
    /// contribute nothing; only `<prefix>__<Class>` labels inside the node
    /// mask are counted.
    fn tally_classes(&self, rows: &[Record]) -> Result<BTreeMap<String, u64>, GraphError> {
        let prefix = self.options.namespace_prefix.as_str();
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();

        for row in rows {
            let count = row.get_i64("count")?;
            if count <= 0 {
                continue;
            }
            let labels = row.get_strings("labels")?;
            if !labels.contains(&self.options.named_individual_label) {
                continue;
            }

            for label in &labels {
                let Some((label_prefix, _)) = label.split_once("__") else {
                    continue;
                };
                if label_prefix != prefix || !self.in_mask(label) {
                    continue;
                }
                let class = label.rsplit("__").next().unwrap_or(label);
                *counts.entry(class.to_string()).or_default() += count as u64;
            }
        }
        Ok(counts)
    }

    fn in_mask(&self, label: &str) -> bool {
        self.options.node_mask.is_empty() || self.options.node_mask.iter().any(|m| m == label)
    }
}

/// Reject blank identifiers before any query is built.
fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, GraphError> {
    if value.trim().is_empty() {
        tracing::warn!(field, "No {field} given, aborting");
        return Err(GraphError::InvalidInput { field });
    }
    Ok(value)
}

fn nodes_from(rows: &[Record]) -> Result<Vec<NodeRecord>, GraphError> {
    rows.iter().map(|row| row.get_node("node", "labels")).collect()
}
