//! GraphML serialization of an [`OntologyGraph`].
//!
//! The document model is a set of serde structs rendered with `quick-xml`.
//! Node ids are URI suffixes; every edge carries its relation type in a
//! `label` data element.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::graph::OntologyGraph;

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Root element: `<graphml>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "graphml")]
pub struct GraphMl {
    #[serde(rename = "@xmlns")]
    pub xmlns: String,
    #[serde(rename = "key", default)]
    pub keys: Vec<GraphMlKey>,
    pub graph: GraphMlGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMlKey {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@for")]
    pub domain: String,
    #[serde(rename = "@attr.name")]
    pub attr_name: String,
    #[serde(rename = "@attr.type")]
    pub attr_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMlGraph {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@edgedefault")]
    pub edge_default: String,
    #[serde(rename = "node", default)]
    pub nodes: Vec<GraphMlNode>,
    #[serde(rename = "edge", default)]
    pub edges: Vec<GraphMlEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMlNode {
    #[serde(rename = "@id")]
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMlEdge {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@source")]
    pub source: String,
    #[serde(rename = "@target")]
    pub target: String,
    pub data: GraphMlData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMlData {
    #[serde(rename = "@key")]
    pub key: String,
    #[serde(rename = "$text")]
    pub value: String,
}

impl GraphMl {
    pub fn from_graph(graph: &OntologyGraph) -> Self {
        Self {
            xmlns: GRAPHML_NS.to_string(),
            keys: vec![GraphMlKey {
                id: "label".to_string(),
                domain: "edge".to_string(),
                attr_name: "label".to_string(),
                attr_type: "string".to_string(),
            }],
            graph: GraphMlGraph {
                id: "G".to_string(),
                edge_default: "directed".to_string(),
                nodes: graph
                    .nodes()
                    .map(|id| GraphMlNode { id: id.to_string() })
                    .collect(),
                edges: graph
                    .edges()
                    .enumerate()
                    .map(|(k, (source, target, label))| GraphMlEdge {
                        id: format!("e{k}"),
                        source: source.to_string(),
                        target: target.to_string(),
                        data: GraphMlData {
                            key: "label".to_string(),
                            value: label.to_string(),
                        },
                    })
                    .collect(),
            },
        }
    }

    /// Render the document, XML declaration included.
    pub fn to_xml(&self) -> Result<String> {
        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 2);
        self.serialize(serializer)
            .map_err(|e| ExportError::Xml(format!("{e}")))?;
        Ok(format!("{XML_DECL}{body}\n"))
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml).map_err(|e| ExportError::Xml(format!("{e}")))
    }
}

/// Write `graph` as GraphML to `out`.
pub fn write_graphml<W: Write>(graph: &OntologyGraph, mut out: W) -> Result<()> {
    let xml = GraphMl::from_graph(graph).to_xml()?;
    out.write_all(xml.as_bytes())?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> OntologyGraph {
        let mut graph = OntologyGraph::new();
        graph.add_edge("A", "B", "relatedTo");
        graph.add_edge("B", "C", "partOf");
        graph
    }

    #[test]
    fn test_document_structure() {
        let doc = GraphMl::from_graph(&chain());
        assert_eq!(doc.graph.edge_default, "directed");
        assert_eq!(doc.graph.nodes.len(), 3);
        assert_eq!(doc.graph.edges.len(), 2);
        assert_eq!(doc.graph.edges[1].source, "B");
        assert_eq!(doc.graph.edges[1].data.value, "partOf");
    }

    #[test]
    fn test_xml_output_parses_back() {
        let xml = GraphMl::from_graph(&chain()).to_xml().unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<graphml"));
        assert!(xml.contains(r#"edgedefault="directed""#));

        let parsed = GraphMl::from_xml(&xml).unwrap();
        assert_eq!(parsed.graph.nodes.len(), 3);
        assert_eq!(parsed.graph.edges[0].target, "B");
        assert_eq!(parsed.graph.edges[0].data.value, "relatedTo");
    }

    #[test]
    fn test_special_characters_escaped() {
        let mut graph = OntologyGraph::new();
        graph.add_edge("a<b", "c&d", "x\"y");
        let xml = GraphMl::from_graph(&graph).to_xml().unwrap();
        assert!(!xml.contains("a<b"));

        let parsed = GraphMl::from_xml(&xml).unwrap();
        assert_eq!(parsed.graph.nodes[0].id, "a<b");
        assert_eq!(parsed.graph.edges[0].data.value, "x\"y");
    }

    #[test]
    fn test_write_graphml_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.graphml");
        write_graphml(&chain(), std::fs::File::create(&path).unwrap()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(GraphMl::from_xml(&text).unwrap().graph.edges.len(), 2);
    }
}
