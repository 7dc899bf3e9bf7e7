//! Force-directed graph page.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use bookgraph_core::{Filters, LOAD_FAILURE};
use tracing::error;

use super::load_failure;
use crate::layout::LayoutOptions;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "graph.html")]
struct GraphTemplate {
    failed: bool,
    message: String,
    /// No elements: render the empty state and skip the layout library.
    empty: bool,
    elements_json: String,
    layout_json: String,
    node_count: usize,
    edge_count: usize,
}

impl GraphTemplate {
    fn failure(message: String) -> Self {
        Self {
            failed: true,
            message,
            empty: true,
            elements_json: "[]".to_string(),
            layout_json: "{}".to_string(),
            node_count: 0,
            edge_count: 0,
        }
    }
}

fn render(status: StatusCode, template: GraphTemplate) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Template error");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response()
        }
    }
}

/// GET /graph - Render the graph for the predicates in the query string.
///
/// Records are filtered at record level first; the builder then applies the
/// relationship predicate again when choosing edges.
pub async fn graph_page(
    State(state): State<AppState>,
    Query(filters): Query<Filters>,
) -> Response {
    let records = match state.load_records().await {
        Ok(records) => records,
        Err(e) => {
            let (status, message) = load_failure(e);
            return render(status, GraphTemplate::failure(message));
        }
    };

    let filtered = filters.filter_records(&records);
    let model = state.builder.build(&filtered, &filters);

    let serialized = model
        .to_script_json()
        .map_err(|e| e.to_string())
        .and_then(|elements| {
            serde_json::to_string(&LayoutOptions::default())
                .map(|layout| (elements, layout))
                .map_err(|e| e.to_string())
        });

    let (elements_json, layout_json) = match serialized {
        Ok(pair) => pair,
        Err(e) => {
            error!(error = %e, "Failed to serialize graph elements");
            return render(StatusCode::INTERNAL_SERVER_ERROR, GraphTemplate::failure(LOAD_FAILURE.to_string()));
        }
    };

    render(
        StatusCode::OK,
        GraphTemplate {
            failed: false,
            message: String::new(),
            empty: model.is_empty(),
            elements_json,
            layout_json,
            node_count: model.nodes().count(),
            edge_count: model.edges().count(),
        },
    )
}
