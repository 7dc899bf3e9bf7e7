//! Reads records from a running bookgraph server over HTTP.

use async_trait::async_trait;
use bookgraph_core::{GraphPayload, GraphRecord};
use std::time::Duration;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::source::RecordSource;

/// `GET {base_url}/api/graph` as a record source.
#[derive(Clone)]
pub struct RemoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/api/graph", self.base_url)
    }
}

#[async_trait]
impl RecordSource for RemoteSource {
    async fn fetch_records(&self) -> GraphResult<Vec<GraphRecord>> {
        let url = self.url();
        debug!(url = %url, "Fetching records from server");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GraphError::Connection(format!("{} returned {}", url, status)));
        }

        let payload: GraphPayload = response.json().await?;
        Ok(payload.data)
    }

    fn describe(&self) -> String {
        self.url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `app` on an ephemeral port and return its base URL.
    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn body_route(status: StatusCode, body: &'static str) -> Router {
        Router::new().route("/api/graph", get(move || async move { (status, body) }))
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        assert_eq!(RemoteSource::new("http://127.0.0.1:3030/").url(), "http://127.0.0.1:3030/api/graph");
    }

    #[tokio::test]
    async fn test_fetch_records() {
        let base = spawn_server(body_route(
            StatusCode::OK,
            r#"{"data":[{"author":"A","book":"B1","tags":["sci-fi","short"]}]}"#,
        ))
        .await;

        let records = RemoteSource::new(&base).fetch_records().await.unwrap();
        assert_eq!(records, vec![GraphRecord::new("A", "B1", &["sci-fi", "short"])]);
    }

    #[tokio::test]
    async fn test_server_error_is_connection_error() {
        let base = spawn_server(body_route(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load data")).await;

        let result = RemoteSource::new(&base).fetch_records().await;
        assert!(matches!(result, Err(GraphError::Connection(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = RemoteSource::new(&format!("http://{}", addr)).fetch_records().await;
        assert!(matches!(result, Err(GraphError::Connection(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        for body in ["<html>oops</html>", r#"{"records":[]}"#] {
            let base = spawn_server(body_route(StatusCode::OK, body)).await;

            let result = RemoteSource::new(&base).fetch_records().await;
            assert!(matches!(result, Err(GraphError::Decode(_))), "{body}");
        }
    }
}
