//! CLI entry point for the ontograph query and export tool.
//!
//! Results are written as JSON to stdout (GraphML for `export --format graphml`);
//! logs go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use ontograph_core::{LabelQuery, Settings};
use ontograph_export::{build_matrix, GraphExporter, MatrixKind, ProgressOptions};
use ontograph_graph::{AccessorOptions, Connection, GraphAccessor, GraphConfig};

#[derive(Parser)]
#[command(name = "ontograph")]
#[command(about = "Query and export an ontology knowledge graph stored in Neo4j")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: ontograph).
    #[arg(short, long, default_value = "ontograph", global = true)]
    config: String,

    /// Disable the busy spinner during long fetches.
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Ontology classes with named-individual counts.
    Labels {
        /// Print class names only.
        #[arg(long)]
        list: bool,
    },
    /// Node degrees, optionally for one class.
    Degrees {
        /// Ontology class name (e.g. Chemical) or full label.
        #[arg(long)]
        class: Option<String>,
    },
    /// A single node by URI.
    Node {
        #[arg(long)]
        uri: String,
    },
    /// All nodes carrying a class label.
    Nodes {
        #[arg(long)]
        label: String,
    },
    /// Neighbors of a node by URI.
    Neighbors {
        #[arg(long)]
        uri: String,
    },
    /// Every triple between named individuals.
    Triples,
    /// Materialize the graph and write it as GraphML or node-link JSON.
    Export {
        #[arg(long, value_enum, default_value = "graphml")]
        format: ExportFormat,
        /// Output file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Materialize the graph and print an adjacency or incidence matrix.
    Matrix {
        #[arg(long, value_enum, default_value = "adjacency")]
        kind: MatrixArg,
        /// Emit coordinate triplets instead of dense rows.
        #[arg(long)]
        sparse: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Graphml,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixArg {
    Adjacency,
    Incidence,
}

impl From<MatrixArg> for MatrixKind {
    fn from(arg: MatrixArg) -> Self {
        match arg {
            MatrixArg::Adjacency => MatrixKind::Adjacency,
            MatrixArg::Incidence => MatrixKind::Incidence,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;

    // Connect to Neo4j.
    let connection = Connection::connect(&GraphConfig::from(&settings.neo4j)).await?;
    let accessor = GraphAccessor::new(
        connection,
        AccessorOptions::from_settings(&settings.ontology, &settings.retry),
    );
    let mut exporter = GraphExporter::new(accessor).with_progress(ProgressOptions {
        enabled: settings.export.show_progress && !cli.no_progress,
        delay: Duration::from_millis(settings.export.spinner_delay_ms),
    });

    let outcome = run(&cli.command, &exporter).await;

    if let Err(e) = exporter.accessor_mut().connection_mut().close() {
        tracing::warn!(error = %e, "Failed to close connection");
    }
    outcome
}

async fn run(
    command: &Command,
    exporter: &GraphExporter<ontograph_graph::GraphClient>,
) -> anyhow::Result<()> {
    let accessor = exporter.accessor();

    match command {
        Command::Labels { list } => {
            let summary = accessor
                .fetch_class_labels(LabelQuery {
                    populated_only: true,
                    include_counts: !list,
                })
                .await?;
            print_json(&summary)?;
        }
        Command::Degrees { class } => {
            let degrees = accessor.fetch_node_degrees(class.as_deref()).await?;
            print_json(&degrees)?;
        }
        Command::Node { uri } => {
            let node = accessor.fetch_node_by_uri(uri).await?;
            print_json(&node)?;
        }
        Command::Nodes { label } => {
            let nodes = accessor.fetch_nodes_by_label(label).await?;
            print_json(&nodes)?;
        }
        Command::Neighbors { uri } => {
            let neighbors = accessor.fetch_neighbors_by_uri(uri).await?;
            print_json(&neighbors)?;
        }
        Command::Triples => {
            let triples = accessor.fetch_all_triples().await?;
            print_json(&triples)?;
        }
        Command::Export { format, output } => {
            let out: Box<dyn Write> = match output {
                Some(path) => Box::new(std::io::BufWriter::new(std::fs::File::create(path)?)),
                None => Box::new(std::io::stdout().lock()),
            };
            match format {
                ExportFormat::Graphml => {
                    let stats = exporter.export_graphml(out).await?;
                    tracing::info!(nodes = stats.node_count, edges = stats.edge_count, "GraphML written");
                }
                ExportFormat::Json => {
                    let doc = exporter.export_node_link().await?;
                    write_json(out, &doc)?;
                }
            }
        }
        Command::Matrix { kind, sparse } => {
            let graph = exporter.materialize_graph().await?;
            let matrix = build_matrix(&graph, (*kind).into(), *sparse);
            print_json(&matrix)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    write_json(std::io::stdout().lock(), value)
}

fn write_json<W: Write, T: Serialize>(mut out: W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
