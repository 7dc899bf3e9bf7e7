//! Route handlers.

pub mod api;
pub mod graph_html;
pub mod table_html;

use axum::http::StatusCode;
use bookgraph_core::LOAD_FAILURE;
use bookgraph_graph::GraphError;
use tracing::error;

/// Map any load failure to the single user-visible error; detail is logged only.
pub(crate) fn load_failure(e: GraphError) -> (StatusCode, String) {
    error!(error = %e, "Failed to load records");
    (StatusCode::INTERNAL_SERVER_ERROR, LOAD_FAILURE.to_string())
}
