//! Application state.

use bookgraph_core::{Generations, GraphModelBuilder, GraphRecord};
use bookgraph_graph::{GraphResult, RecordSource};
use std::sync::Arc;
use tracing::debug;

/// Application state shared across handlers.
///
/// Holds no data: every request fetches from `source` and derives its view
/// from scratch.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecordSource>,
    pub builder: GraphModelBuilder,
    pub generations: Arc<Generations>,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>, builder: GraphModelBuilder) -> Self {
        Self {
            source,
            builder,
            generations: Arc::new(Generations::new()),
        }
    }

    /// One fresh fetch from the record source.
    pub async fn load_records(&self) -> GraphResult<Vec<GraphRecord>> {
        let records = self.source.fetch_records().await?;
        debug!(source = %self.source.describe(), records = records.len(), "Loaded records");
        Ok(records)
    }
}
