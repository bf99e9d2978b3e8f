//! Cypher templates for ontology graph reads.
//!
//! Every template binds caller input through `$parameters`; nothing is
//! spliced into the query text. Each template also declares the columns it
//! returns so rows can be decoded without driver-specific key lookups.

use std::collections::BTreeMap;

use crate::client::GraphError;

/// A named, parameterized Cypher statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTemplate {
    pub name: &'static str,
    pub cypher: &'static str,
    pub params: &'static [&'static str],
    pub columns: &'static [&'static str],
}

impl QueryTemplate {
    /// Start binding parameters for this template.
    pub fn bind(&'static self) -> CypherQuery {
        CypherQuery {
            template: self,
            params: BTreeMap::new(),
        }
    }
}

// ── Templates ────────────────────────────────────────────────────

/// Distinct label combinations with the number of nodes carrying each.
pub static NODE_COUNTS_BY_LABEL: QueryTemplate = QueryTemplate {
    name: "NODE_COUNTS_BY_LABEL",
    cypher: "MATCH (n)
             RETURN labels(n) AS labels, count(*) AS count",
    params: &[],
    columns: &["labels", "count"],
};

/// Degree of every named individual, optionally restricted by a label mask.
pub static FETCH_ALL_NODE_DEGREES: QueryTemplate = QueryTemplate {
    name: "FETCH_ALL_NODE_DEGREES",
    cypher: "MATCH (n)
             WHERE $named_individual IN labels(n)
               AND (size($node_mask) = 0 OR any(l IN labels(n) WHERE l IN $node_mask))
             RETURN n.uri AS uri, COUNT { (n)--() } AS degree
             ORDER BY degree DESC",
    params: &["named_individual", "node_mask"],
    columns: &["uri", "degree"],
};

/// Degree of every node carrying a given class label.
pub static FETCH_NODE_DEGREES_FOR_CLASS: QueryTemplate = QueryTemplate {
    name: "FETCH_NODE_DEGREES_FOR_CLASS",
    cypher: "MATCH (n)
             WHERE $label IN labels(n)
             RETURN n.uri AS uri, COUNT { (n)--() } AS degree
             ORDER BY degree DESC",
    params: &["label"],
    columns: &["uri", "degree"],
};

/// Nodes whose `uri` property equals `$uri`. More than one row is a data error.
pub static FETCH_INDIVIDUAL_NODE_BY_URI: QueryTemplate = QueryTemplate {
    name: "FETCH_INDIVIDUAL_NODE_BY_URI",
    cypher: "MATCH (n {uri: $uri})
             RETURN properties(n) AS node, labels(n) AS labels",
    params: &["uri"],
    columns: &["node", "labels"],
};

/// All nodes carrying `$label`, with every label each node has.
pub static FETCH_NODES_BY_LABEL: QueryTemplate = QueryTemplate {
    name: "FETCH_NODES_BY_LABEL",
    cypher: "MATCH (n)
             WHERE $label IN labels(n)
             RETURN properties(n) AS node, labels(n) AS labels",
    params: &["label"],
    columns: &["node", "labels"],
};

/// Distinct nodes adjacent (either direction) to the node with `$uri`.
pub static FETCH_NEIGHBORS_BY_URI: QueryTemplate = QueryTemplate {
    name: "FETCH_NEIGHBORS_BY_URI",
    cypher: "MATCH ({uri: $uri})--(m)
             RETURN DISTINCT properties(m) AS node, labels(m) AS labels",
    params: &["uri"],
    columns: &["node", "labels"],
};

/// Every relationship between two named individuals.
pub static FETCH_ALL_TRIPLES: QueryTemplate = QueryTemplate {
    name: "FETCH_ALL_TRIPLES",
    cypher: "MATCH (n)-[r]->(m)
             WHERE $named_individual IN labels(n)
               AND $named_individual IN labels(m)
             RETURN properties(n) AS subject, labels(n) AS subject_labels,
                    type(r) AS relation,
                    properties(m) AS object, labels(m) AS object_labels",
    params: &["named_individual"],
    columns: &[
        "subject",
        "subject_labels",
        "relation",
        "object",
        "object_labels",
    ],
};

// ── Bound queries ────────────────────────────────────────────────

/// A value bound to a template parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    StrList(Vec<String>),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::StrList(value)
    }
}

/// A template plus its bound parameters, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    template: &'static QueryTemplate,
    params: BTreeMap<&'static str, ParamValue>,
}

impl CypherQuery {
    /// Bind a parameter. Names not declared by the template are ignored
    /// with a warning.
    pub fn param(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        if self.template.params.contains(&name) {
            self.params.insert(name, value.into());
        } else {
            tracing::warn!(template = self.template.name, param = name, "Ignoring undeclared parameter");
        }
        self
    }

    /// Fail with `UnboundParameter` if a declared parameter has no value.
    pub fn validate(&self) -> Result<(), GraphError> {
        match self
            .template
            .params
            .iter()
            .find(|p| !self.params.contains_key(*p))
        {
            Some(missing) => Err(GraphError::UnboundParameter {
                template: self.template.name,
                param: *missing,
            }),
            None => Ok(()),
        }
    }

    pub fn template(&self) -> &'static str {
        self.template.name
    }

    pub fn text(&self) -> &'static str {
        self.template.cypher
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.template.columns
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Convert into a driver query with every parameter bound.
    pub fn to_neo4j(&self) -> neo4rs::Query {
        self.params
            .iter()
            .fold(neo4rs::query(self.template.cypher), |q, (name, value)| {
                match value {
                    ParamValue::Str(s) => q.param(name, s.clone()),
                    ParamValue::StrList(list) => q.param(name, list.clone()),
                }
            })
    }
}
