//! Integration tests for ontograph-graph against a live Neo4j instance.
//!
//! These tests require a Neo4j server on bolt://localhost:7687.
//! Run with: cargo test --package ontograph-graph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available.

use std::time::{SystemTime, UNIX_EPOCH};

use ontograph_core::LabelQuery;
use ontograph_graph::{
    AccessorOptions, Connection, GraphAccessor, GraphClient, GraphConfig, GraphError,
};

fn test_config() -> GraphConfig {
    GraphConfig {
        password: std::env::var("NEO4J_PASSWORD").unwrap_or_else(|_| "neo4j".to_string()),
        ..GraphConfig::default()
    }
}

async fn connect_or_skip() -> Option<GraphClient> {
    match GraphClient::connect(&test_config()).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

/// A URI namespace unique to one test run.
fn unique_namespace() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("http://test.ontograph/{nanos}#")
}

async fn seed_chain(client: &GraphClient, ns: &str) {
    let q = neo4rs::query(
        "CREATE (a:ns0__TestChemical:owl__NamedIndividual {uri: $a})
         CREATE (b:ns0__TestGene:owl__NamedIndividual {uri: $b})
         CREATE (c:ns0__TestGene:owl__NamedIndividual {uri: $c})
         CREATE (a)-[:relatedTo]->(b)
         CREATE (b)-[:relatedTo]->(c)",
    )
    .param("a", format!("{ns}A"))
    .param("b", format!("{ns}B"))
    .param("c", format!("{ns}C"));
    client.inner().run(q).await.unwrap();
}

async fn cleanup(client: &GraphClient, ns: &str) {
    let q = neo4rs::query("MATCH (n) WHERE n.uri STARTS WITH $ns DETACH DELETE n")
        .param("ns", ns.to_string());
    let _ = client.inner().run(q).await;
}

fn accessor(client: GraphClient) -> GraphAccessor<GraphClient> {
    GraphAccessor::new(Connection::with_executor(client), AccessorOptions::default())
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_node_lookup_and_neighbors() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = unique_namespace();
    seed_chain(&client, &ns).await;
    let acc = accessor(client.clone());

    let b = acc
        .fetch_node_by_uri(&format!("{ns}B"))
        .await
        .unwrap()
        .expect("B exists");
    assert_eq!(b.suffix(), "B");
    assert!(b.has_label("ns0__TestGene"));

    let neighbors = acc
        .fetch_neighbors_by_uri(&format!("{ns}B"))
        .await
        .unwrap()
        .expect("B has neighbors");
    assert_eq!(neighbors.len(), 2);

    let missing = acc.fetch_node_by_uri(&format!("{ns}Missing")).await.unwrap();
    assert!(missing.is_none());

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_labels_degrees_and_triples() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let ns = unique_namespace();
    seed_chain(&client, &ns).await;
    let acc = accessor(client.clone());

    let summary = acc.fetch_class_labels(LabelQuery::default()).await.unwrap();
    assert!(summary.labels().contains(&"TestGene"));

    let degrees = acc
        .fetch_node_degrees(Some("TestGene"))
        .await
        .unwrap()
        .expect("genes have degrees");
    let b = degrees.iter().find(|d| d.uri == format!("{ns}B")).unwrap();
    assert_eq!(b.degree, 2);

    let triples = acc.fetch_all_triples().await.unwrap();
    let ours: Vec<_> = triples
        .iter()
        .filter(|t| t.subject.uri.starts_with(&ns))
        .collect();
    assert_eq!(ours.len(), 2);
    assert!(ours.iter().all(|t| t.relation == "relatedTo"));

    cleanup(&client, &ns).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_close_then_query_fails() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    let mut acc = accessor(client);
    acc.connection_mut().close().unwrap();
    assert!(acc.fetch_all_triples().await.is_err());
    assert!(acc.connection_mut().close().is_err());
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_open_while_active_refused() {
    let config = test_config();
    let mut conn = match Connection::connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            return;
        }
    };

    assert!(matches!(
        conn.open(&config).await,
        Err(GraphError::ConnectionAlreadyActive)
    ));
    assert!(conn.is_connected());

    conn.close().unwrap();
    conn.open(&config).await.unwrap();
    assert!(conn.is_connected());
}
