//! Configuration management for Ontograph.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`ONTOGRAPH__` prefix, `__` between sections)
//! 2. Config file (`ontograph.toml` by default)
//! 3. Defaults

use serde::Deserialize;

use crate::error::Result;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ONTOGRAPH";

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub neo4j: Neo4jSettings,
    #[serde(default)]
    pub ontology: OntologySettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub export: ExportSettings,
}

/// Connection parameters for the Neo4j server.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jSettings {
    /// Bolt endpoint, e.g. `bolt://localhost:7687`.
    #[serde(default = "default_uri")]
    pub uri: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
    /// Upper bound for a single read, in seconds. Zero disables the bound.
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

/// How ontology concepts are encoded as node labels.
#[derive(Debug, Clone, Deserialize)]
pub struct OntologySettings {
    /// Label namespace for ontology classes (`ns0` in `ns0__Chemical`).
    #[serde(default = "default_namespace_prefix")]
    pub namespace_prefix: String,

    /// Label marking ontology individuals.
    #[serde(default = "default_named_individual")]
    pub named_individual_label: String,

    /// Labels restricting which nodes are considered; empty disables filtering.
    #[serde(default)]
    pub node_mask: Vec<String>,
}

/// Retry policy for transient connection failures.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

/// Export and console behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    /// Show a busy spinner on stderr while long fetches run.
    #[serde(default = "default_true")]
    pub show_progress: bool,
    #[serde(default = "default_spinner_delay")]
    pub spinner_delay_ms: u64,
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    500
}

fn default_query_timeout() -> u64 {
    300
}

fn default_namespace_prefix() -> String {
    "ns0".to_string()
}

fn default_named_individual() -> String {
    "owl__NamedIndividual".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    250
}

fn default_true() -> bool {
    true
}

fn default_spinner_delay() -> u64 {
    100
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

impl Default for OntologySettings {
    fn default() -> Self {
        Self {
            namespace_prefix: default_namespace_prefix(),
            named_individual_label: default_named_individual(),
            node_mask: Vec::new(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            show_progress: default_true(),
            spinner_delay_ms: default_spinner_delay(),
        }
    }
}

impl Settings {
    /// Load settings from `<file_prefix>.toml` (optional) and the environment.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ontology.node_mask")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        tracing::debug!(
            uri = %settings.neo4j.uri,
            namespace = %settings.ontology.namespace_prefix,
            mask = ?settings.ontology.node_mask,
            "Settings loaded"
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(settings.neo4j.user, "neo4j");
        assert_eq!(settings.ontology.namespace_prefix, "ns0");
        assert_eq!(settings.ontology.named_individual_label, "owl__NamedIndividual");
        assert!(settings.ontology.node_mask.is_empty());
        assert_eq!(settings.retry.max_retries, 2);
        assert!(settings.export.show_progress);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("absent");
        let settings = Settings::load(prefix.to_str().unwrap()).unwrap();
        assert_eq!(settings.neo4j.fetch_size, 500);
        assert_eq!(settings.export.spinner_delay_ms, 100);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ontograph.toml"),
            r#"
[neo4j]
uri = "bolt://graph.internal:7687"
password = "secret"

[ontology]
namespace_prefix = "ns1"
node_mask = ["ns1__Chemical", "ns1__Gene"]

[retry]
max_retries = 0
"#,
        )
        .unwrap();

        let prefix = dir.path().join("ontograph");
        let settings = Settings::load(prefix.to_str().unwrap()).unwrap();

        assert_eq!(settings.neo4j.uri, "bolt://graph.internal:7687");
        assert_eq!(settings.neo4j.password, "secret");
        assert_eq!(settings.neo4j.user, "neo4j");
        assert_eq!(settings.ontology.namespace_prefix, "ns1");
        assert_eq!(settings.ontology.node_mask.len(), 2);
        assert_eq!(settings.retry.max_retries, 0);
        assert_eq!(settings.retry.backoff_ms, 250);
    }
}
