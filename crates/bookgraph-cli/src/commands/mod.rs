//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use bookgraph_core::Filters;
use bookgraph_graph::{GraphClient, GraphConfig, RecordSource, RemoteSource};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod graph;
pub mod serve;

/// How long to wait for Neo4j to answer the connection ping.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Book Graph - Author, book and tag relationships from Neo4j
#[derive(Parser)]
#[command(name = "bookgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Inspect the graph from the terminal
    #[command(subcommand)]
    Graph(graph::GraphCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Graph(cmd) => graph::execute(cmd).await,
        }
    }
}

/// Optional predicates shared by the inspection commands.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Only this author
    #[arg(long)]
    pub author: Option<String>,

    /// Only this book title
    #[arg(long)]
    pub book: Option<String>,

    /// Only this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only this relationship kind (WROTE or TAGGED_AS)
    #[arg(long)]
    pub relationship: Option<String>,
}

impl From<FilterArgs> for Filters {
    fn from(args: FilterArgs) -> Self {
        Filters {
            author: args.author,
            book: args.book,
            tag: args.tag,
            relationship: args.relationship,
        }
    }
}

/// Where the inspection commands read records from.
#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    /// Read from a running bookgraph server instead of Neo4j
    #[arg(long, env = "BOOKGRAPH_REMOTE")]
    pub remote: Option<String>,
}

/// Connect to Neo4j using the `NEO4J_*` environment variables.
pub async fn connect_graph() -> Result<GraphClient> {
    let config = GraphConfig::from_env()?;
    let client = tokio::time::timeout(CONNECT_TIMEOUT, GraphClient::connect(&config))
        .await
        .with_context(|| format!("Timed out connecting to Neo4j at {}", config.uri))??;
    Ok(client)
}

/// Open the record source selected by `args`.
pub async fn open_source(args: &SourceArgs) -> Result<Arc<dyn RecordSource>> {
    let source: Arc<dyn RecordSource> = match &args.remote {
        Some(url) => Arc::new(RemoteSource::new(url)),
        None => Arc::new(connect_graph().await?),
    };
    info!(source = %source.describe(), "Record source ready");
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_args_into_filters() {
        let cli = Cli::parse_from(["bookgraph", "graph", "rows", "--tag", "short", "--relationship", "TAGGED_AS"]);
        let Commands::Graph(graph::GraphCommands::Rows { filters, .. }) = cli.command else {
            panic!("expected graph rows");
        };
        let filters = Filters::from(filters);
        assert_eq!(filters.tag(), Some("short"));
        assert_eq!(filters.relationship(), Some("TAGGED_AS"));
        assert_eq!(filters.author(), None);
    }

    #[test]
    fn test_node_ids_parse() {
        let cli = Cli::parse_from(["bookgraph", "graph", "elements", "--node-ids", "namespaced"]);
        let Commands::Graph(graph::GraphCommands::Elements { node_ids, .. }) = cli.command else {
            panic!("expected graph elements");
        };
        assert_eq!(node_ids, bookgraph_core::NodeIdentity::Namespaced);
        assert!(Cli::try_parse_from(["bookgraph", "serve", "--node-ids", "kind"]).is_err());
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::parse_from(["bookgraph", "serve"]);
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 3030);
        assert_eq!(args.host, "127.0.0.1");
        assert_eq!(args.node_ids, bookgraph_core::NodeIdentity::Label);
        assert!(!args.log);
    }
}
