//! Where records come from.

use async_trait::async_trait;
use bookgraph_core::GraphRecord;

use crate::error::{GraphError, GraphResult};
use crate::{queries, GraphClient};

/// A fetchable, bounded set of author/book/tag records.
///
/// Every call is an independent fetch; implementations keep no cache.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> GraphResult<Vec<GraphRecord>>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl RecordSource for GraphClient {
    async fn fetch_records(&self) -> GraphResult<Vec<GraphRecord>> {
        queries::fetch_records(self).await
    }

    fn describe(&self) -> String {
        "neo4j".to_string()
    }
}

/// In-memory records, or a fixed failure.
///
/// Used by tests and for serving a snapshot without a database.
#[derive(Debug, Clone)]
pub struct StaticSource {
    outcome: Result<Vec<GraphRecord>, String>,
}

impl StaticSource {
    pub fn new(records: Vec<GraphRecord>) -> Self {
        Self { outcome: Ok(records) }
    }

    /// A source whose every fetch fails with a query error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self { outcome: Err(message.into()) }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_records(&self) -> GraphResult<Vec<GraphRecord>> {
        self.outcome.clone().map_err(GraphError::Query)
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_returns_records() {
        let records = vec![GraphRecord::new("A", "B1", &["sci-fi"])];
        let source = StaticSource::new(records.clone());
        assert_eq!(source.fetch_records().await.unwrap(), records);
        // Fetching twice yields fresh copies.
        assert_eq!(source.fetch_records().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_failing_source() {
        let source = StaticSource::failing("session rejected");
        let err = source.fetch_records().await.unwrap_err();
        assert!(matches!(err, GraphError::Query(msg) if msg == "session rejected"));
    }
}
