//! Web server command.

use anyhow::{Context, Result};
use bookgraph_core::{GraphModelBuilder, GraphPayload, NodeIdentity};
use bookgraph_graph::{RecordSource, StaticSource};
use bookgraph_web::AppState;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Node id scheme: `label`, or `namespaced` to keep a tag and a book
    /// with the same name apart
    #[arg(long, default_value = "label")]
    pub node_ids: NodeIdentity,

    /// Serve a saved `{"data": [...]}` file instead of querying Neo4j
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to bookgraph-serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

/// Load a snapshot written by `bookgraph graph records --json`.
fn load_snapshot(path: &Path) -> Result<StaticSource> {
    let body = std::fs::read(path).with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let payload: GraphPayload = serde_json::from_slice(&body)
        .with_context(|| format!("Snapshot {} is not a {{\"data\": [...]}} document", path.display()))?;
    info!(records = payload.data.len(), path = %path.display(), "Loaded snapshot");
    Ok(StaticSource::new(payload.data))
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    // Missing connection settings abort here, before the port is bound.
    let source: Arc<dyn RecordSource> = match &args.snapshot {
        Some(path) => Arc::new(load_snapshot(path)?),
        None => Arc::new(super::connect_graph().await?),
    };

    let state = AppState::new(source, GraphModelBuilder::new(args.node_ids));

    println!();
    println!("  {} {}", "Book Graph".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}      http://{}:{}", "Table".green(), args.host, args.port);
    println!("  {}      http://{}:{}/graph", "Graph".green(), args.host, args.port);
    println!("  {}        http://{}:{}/api/graph", "API".green(), args.host, args.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    bookgraph_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_snapshot() {
        let path = std::env::temp_dir().join(format!("bookgraph-snapshot-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"data":[{"author":"A","book":"B1","tags":["short"]}]}"#).unwrap();

        let source = load_snapshot(&path).unwrap();
        let records = source.fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tags, vec!["short"]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_snapshot() {
        let path = std::env::temp_dir().join(format!("bookgraph-bad-snapshot-{}.json", std::process::id()));
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_snapshot(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
