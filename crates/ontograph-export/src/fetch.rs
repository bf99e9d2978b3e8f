//! Triple fetching from Neo4j via the GraphAccessor.

use std::time::Duration;

use ontograph_core::Triple;
use ontograph_graph::{GraphAccessor, QueryExecutor};

use crate::error::Result;
use crate::progress::with_spinner;

/// Console behavior while fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOptions {
    pub enabled: bool,
    pub delay: Duration,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            delay: Duration::from_millis(100),
        }
    }
}

/// Fetch every triple between named individuals.
///
/// The whole result set is held in memory; there is no pagination.
pub async fn fetch_all_triples<E: QueryExecutor>(
    accessor: &GraphAccessor<E>,
    progress: ProgressOptions,
) -> Result<Vec<Triple>> {
    tracing::info!("Fetching all triples for named individuals, this may take a while");
    let started = std::time::Instant::now();

    let triples = with_spinner(
        progress.enabled,
        progress.delay,
        accessor.fetch_all_triples(),
    )
    .await?;

    tracing::info!(
        triples = triples.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "All triples received"
    );
    Ok(triples)
}
