//! Driver-independent result rows.

use ontograph_core::NodeRecord;
use serde_json::{Map, Value};

use crate::client::GraphError;

/// One result row: column name → JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: Map<String, Value>,
}

impl Record {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    /// Decode the named columns of a neo4rs row.
    pub fn from_row(row: &neo4rs::Row, columns: &[&str]) -> Result<Self, GraphError> {
        let mut map = Map::with_capacity(columns.len());
        for column in columns {
            let value: Value = row.get(column).map_err(|e| {
                GraphError::Serialization(format!("Failed to decode column {column}: {e}"))
            })?;
            map.insert((*column).to_string(), value);
        }
        Ok(Self { columns: map })
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn get_str(&self, column: &str) -> Result<&str, GraphError> {
        self.get(column)
            .and_then(Value::as_str)
            .ok_or_else(|| missing(column, "string"))
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, GraphError> {
        self.get(column)
            .and_then(Value::as_i64)
            .ok_or_else(|| missing(column, "integer"))
    }

    pub fn get_strings(&self, column: &str) -> Result<Vec<String>, GraphError> {
        let items = self
            .get(column)
            .and_then(Value::as_array)
            .ok_or_else(|| missing(column, "list"))?;
        items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| missing(column, "list of strings"))
            })
            .collect()
    }

    /// Build a node from a property-map column and a labels column.
    pub fn get_node(&self, props_column: &str, labels_column: &str) -> Result<NodeRecord, GraphError> {
        let props = self
            .get(props_column)
            .cloned()
            .ok_or_else(|| missing(props_column, "property map"))?;
        let labels = self.get_strings(labels_column)?;
        NodeRecord::from_properties(props, labels).ok_or_else(|| {
            GraphError::Serialization(format!("Node in column {props_column} has no uri property"))
        })
    }
}

impl From<Value> for Record {
    /// Objects become rows; any other value yields an empty row.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(columns) => Self { columns },
            _ => Self::default(),
        }
    }
}

fn missing(column: &str, expected: &str) -> GraphError {
    GraphError::Serialization(format!("Column {column} is missing or not a {expected}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_getters() {
        let record = Record::from(json!({
            "uri": "http://ex.org/o#A",
            "degree": 7,
            "labels": ["ns0__Gene", "owl__NamedIndividual"],
        }));

        assert_eq!(record.get_str("uri").unwrap(), "http://ex.org/o#A");
        assert_eq!(record.get_i64("degree").unwrap(), 7);
        assert_eq!(record.get_strings("labels").unwrap().len(), 2);
        assert!(record.get_i64("uri").is_err());
        assert!(record.get_str("absent").is_err());
    }

    #[test]
    fn test_get_node() {
        let record = Record::from(json!({
            "node": {"uri": "http://ex.org/o#A", "name": "alpha"},
            "labels": ["ns0__Gene"],
        }));
        let node = record.get_node("node", "labels").unwrap();
        assert_eq!(node.uri, "http://ex.org/o#A");
        assert_eq!(node.labels, vec!["ns0__Gene".to_string()]);
    }

    #[test]
    fn test_get_node_without_uri_fails() {
        let record = Record::from(json!({
            "node": {"name": "alpha"},
            "labels": [],
        }));
        assert!(matches!(
            record.get_node("node", "labels"),
            Err(GraphError::Serialization(_))
        ));
    }

    #[test]
    fn test_non_object_is_empty() {
        let record = Record::from(json!([1, 2]));
        assert_eq!(record, Record::default());
    }
}
