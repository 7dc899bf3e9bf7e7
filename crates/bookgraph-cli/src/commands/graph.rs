//! Graph inspection commands.

use anyhow::Result;
use bookgraph_core::{
    flatten, Filters, GraphModelBuilder, GraphPayload, NodeIdentity, RelationshipRow, ViewSlot, ViewState,
};
use bookgraph_graph::{GraphError, GraphResult, RecordSource};
use clap::Subcommand;
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{FilterArgs, SourceArgs};
use crate::output;

#[derive(Subcommand)]
pub enum GraphCommands {
    /// List raw author/book/tag records
    Records {
        #[command(flatten)]
        source: SourceArgs,
        /// Print the `{"data": [...]}` document instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List flattened relationship rows
    Rows {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        #[arg(long)]
        json: bool,
    },

    /// List the nodes and edges of the graph view
    Elements {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Node id scheme: `label` or `namespaced`
        #[arg(long, default_value = "label")]
        node_ids: NodeIdentity,
        #[arg(long)]
        json: bool,
    },

    /// Re-fetch rows on an interval and print the newest result
    Watch {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        filters: FilterArgs,
        /// Seconds between fetches
        #[arg(long, default_value = "5")]
        interval: u64,
    },

    /// Show author, book and tag counts
    Status,
}

pub async fn execute(cmd: GraphCommands) -> Result<()> {
    match cmd {
        GraphCommands::Records { source, json } => cmd_records(&source, json).await,
        GraphCommands::Rows { source, filters, json } => cmd_rows(&source, filters.into(), json).await,
        GraphCommands::Elements { source, filters, node_ids, json } => {
            cmd_elements(&source, filters.into(), node_ids, json).await
        }
        GraphCommands::Watch { source, filters, interval } => {
            cmd_watch(&source, filters.into(), interval).await
        }
        GraphCommands::Status => cmd_status().await,
    }
}

/// Print every record.
async fn cmd_records(source: &SourceArgs, json: bool) -> Result<()> {
    let source = super::open_source(source).await?;
    let data = source.fetch_records().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&GraphPayload { data })?);
    } else {
        output::print_records_table(&data);
    }
    Ok(())
}

/// Print the row-level filtered table.
async fn cmd_rows(source: &SourceArgs, filters: Filters, json: bool) -> Result<()> {
    let source = super::open_source(source).await?;
    let records = source.fetch_records().await?;
    let rows = filters.filter_rows(&flatten(&records));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        output::print_rows_table(&rows);
    }
    Ok(())
}

/// Print the graph elements for the record-level filtered records.
async fn cmd_elements(source: &SourceArgs, filters: Filters, identity: NodeIdentity, json: bool) -> Result<()> {
    let source = super::open_source(source).await?;
    let records = source.fetch_records().await?;

    let model = GraphModelBuilder::new(identity).build(&filters.filter_records(&records), &filters);

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        output::print_model(&model);
    }
    Ok(())
}

/// Fetch on every tick without waiting for the previous fetch.
///
/// Results settle through a [`ViewSlot`], so a slow fetch that finishes after
/// a newer one is dropped instead of being printed over it. A fetch that
/// outlives one interval is abandoned.
async fn cmd_watch(source: &SourceArgs, filters: Filters, interval: u64) -> Result<()> {
    let source = super::open_source(source).await?;
    let slot: Arc<ViewSlot<Vec<RelationshipRow>>> = Arc::new(ViewSlot::new());
    let filters = Arc::new(filters);
    let period = Duration::from_secs(interval.max(1));

    let mut ticker = tokio::time::interval(period);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    println!("{}", "Watching relationships (Ctrl+C to stop)".bold());

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let ticket = slot.begin();
                let (slot, source, filters) = (slot.clone(), source.clone(), filters.clone());

                tokio::spawn(async move {
                    let result = fetch_rows_within(source.as_ref(), &filters, period).await;

                    match slot.settle(ticket, result) {
                        Some(view) => output::print_view(ticket.generation(), &view),
                        None => debug!(generation = ticket.generation(), "Fetch superseded"),
                    }
                });
            }
            _ = &mut shutdown => break,
        }
    }

    if slot.snapshot() == ViewState::Loading {
        debug!(generation = slot.latest_generation(), "Fetch still in flight at shutdown");
    }
    println!("\n{} after {} fetches", "Stopped".bold(), slot.latest_generation());

    Ok(())
}

/// Fetch, flatten and filter rows, giving up after `limit`.
async fn fetch_rows_within(
    source: &dyn RecordSource,
    filters: &Filters,
    limit: Duration,
) -> GraphResult<Vec<RelationshipRow>> {
    let records = tokio::time::timeout(limit, source.fetch_records())
        .await
        .map_err(|_| GraphError::Connection(format!("{} did not answer within {:?}", source.describe(), limit)))??;
    Ok(filters.filter_rows(&flatten(&records)))
}

/// Show entity counts.
async fn cmd_status() -> Result<()> {
    let client = super::connect_graph().await?;
    let counts = client.counts().await?;

    println!("{}", "Book Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Authors: {}", counts.authors.to_string().cyan());
    println!("  Books:   {}", counts.books.to_string().cyan());
    println!("  Tags:    {}", counts.tags.to_string().cyan());
    println!("{}", "─".repeat(40));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookgraph_core::GraphRecord;
    use bookgraph_graph::StaticSource;

    /// A source that never answers.
    struct StalledSource;

    #[async_trait]
    impl RecordSource for StalledSource {
        async fn fetch_records(&self) -> GraphResult<Vec<GraphRecord>> {
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "stalled".to_string()
        }
    }

    #[tokio::test]
    async fn test_fetch_rows_within_filters() {
        let source = StaticSource::new(vec![GraphRecord::new("A", "B1", &["short"])]);
        let filters = Filters { relationship: Some("TAGGED_AS".to_string()), ..Default::default() };

        let rows = fetch_rows_within(&source, &filters, Duration::from_secs(1)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tag.as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn test_stalled_fetch_times_out() {
        let result = fetch_rows_within(&StalledSource, &Filters::default(), Duration::from_millis(50)).await;
        assert!(matches!(result, Err(GraphError::Connection(_))));
    }
}
