//! Core domain types for the ontology knowledge graph.
//!
//! Nodes are ontology individuals or classes identified by a namespaced `uri`
//! (e.g. `http://example.org/onto#Aspirin`). Labels follow the
//! `<prefix>__<Class>` convention of RDF-to-property-graph imports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Return the portion of a namespaced URI after the last `#`.
///
/// URIs without a `#` are returned whole.
pub fn uri_suffix(uri: &str) -> &str {
    match uri.rfind('#') {
        Some(pos) => &uri[pos + 1..],
        None => uri,
    }
}

// ── Nodes ─────────────────────────────────────────────────────────

/// A node read from the graph database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Namespaced identifier, always present.
    pub uri: String,
    /// Every label carried by the node (ontology classes plus markers).
    pub labels: Vec<String>,
    /// All node properties, `uri` included.
    pub properties: serde_json::Value,
}

impl NodeRecord {
    /// Build a record from a property map, pulling `uri` out of it.
    ///
    /// Returns `None` when the map has no string `uri` property.
    pub fn from_properties(properties: serde_json::Value, labels: Vec<String>) -> Option<Self> {
        let uri = properties.get("uri")?.as_str()?.to_string();
        Some(Self {
            uri,
            labels,
            properties,
        })
    }

    /// URI suffix used as the vertex name in exported graphs.
    pub fn suffix(&self) -> &str {
        uri_suffix(&self.uri)
    }

    /// Whether the node carries `label`.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Look up a property by key.
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }
}

// ── Relationships ─────────────────────────────────────────────────

/// A (subject, relation, object) triple from the all-triples export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: NodeRecord,
    pub relation: String,
    pub object: NodeRecord,
}

/// A node URI paired with its (undirected) degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDegree {
    pub uri: String,
    pub degree: i64,
}

// ── Label enumeration ─────────────────────────────────────────────

/// Options for class label enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelQuery {
    /// Kept for compatibility with older callers. Unpopulated classes are
    /// never reported, whatever this is set to.
    pub populated_only: bool,
    /// Return a count per class instead of a bare list of names.
    pub include_counts: bool,
}

impl Default for LabelQuery {
    fn default() -> Self {
        Self {
            populated_only: true,
            include_counts: true,
        }
    }
}

/// Result of class label enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelSummary {
    /// Class name → number of named individuals.
    Counts(BTreeMap<String, u64>),
    /// Class names only, sorted.
    Labels(Vec<String>),
}

impl LabelSummary {
    /// Class names in the summary, sorted.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Counts(counts) => counts.keys().map(String::as_str).collect(),
            Self::Labels(labels) => labels.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Counts(counts) => counts.is_empty(),
            Self::Labels(labels) => labels.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_suffix() {
        assert_eq!(uri_suffix("http://example.org/onto#Aspirin"), "Aspirin");
        assert_eq!(uri_suffix("http://example.org/a#b#c"), "c");
        assert_eq!(uri_suffix("no-hash"), "no-hash");
        assert_eq!(uri_suffix("trailing#"), "");
    }

    #[test]
    fn test_node_record_from_properties() {
        let props = serde_json::json!({"uri": "http://ex.org/o#Gene1", "name": "BRCA1"});
        let node = NodeRecord::from_properties(props, vec!["ns0__Gene".to_string()]).unwrap();

        assert_eq!(node.uri, "http://ex.org/o#Gene1");
        assert_eq!(node.suffix(), "Gene1");
        assert!(node.has_label("ns0__Gene"));
        assert!(!node.has_label("ns0__Chemical"));
        assert_eq!(
            node.property("name").and_then(|v| v.as_str()),
            Some("BRCA1")
        );
    }

    #[test]
    fn test_node_record_requires_uri() {
        let props = serde_json::json!({"name": "orphan"});
        assert!(NodeRecord::from_properties(props, vec![]).is_none());

        let numeric = serde_json::json!({"uri": 42});
        assert!(NodeRecord::from_properties(numeric, vec![]).is_none());
    }

    #[test]
    fn test_label_summary_serialization() {
        let mut counts = BTreeMap::new();
        counts.insert("Chemical".to_string(), 3);
        let json = serde_json::to_value(LabelSummary::Counts(counts)).unwrap();
        assert_eq!(json, serde_json::json!({"Chemical": 3}));

        let json = serde_json::to_value(LabelSummary::Labels(vec!["Gene".into()])).unwrap();
        assert_eq!(json, serde_json::json!(["Gene"]));
    }

    #[test]
    fn test_label_summary_labels() {
        let mut counts = BTreeMap::new();
        counts.insert("Gene".to_string(), 1);
        counts.insert("Chemical".to_string(), 2);
        let summary = LabelSummary::Counts(counts);
        assert_eq!(summary.labels(), vec!["Chemical", "Gene"]);
        assert!(!summary.is_empty());
        assert!(LabelSummary::Labels(vec![]).is_empty());
    }
}
