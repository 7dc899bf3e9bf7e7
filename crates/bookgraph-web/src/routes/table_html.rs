//! Relationship table page.
//!
//! Server-rendered: filter selectors, the filtered rows, and a form action
//! that carries the current selection to the graph page.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use bookgraph_core::{flatten, Filters, FilterOptions, RelationshipRow};
use tracing::error;

use super::load_failure;
use crate::state::AppState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "table.html")]
struct TableTemplate {
    failed: bool,
    message: String,
    selects: Vec<SelectView>,
    rows: Vec<RowView>,
}

/// View model for one filter selector.
struct SelectView {
    name: &'static str,
    label: &'static str,
    all_selected: bool,
    options: Vec<OptionView>,
}

struct OptionView {
    value: String,
    selected: bool,
}

/// View model for a table row.
struct RowView {
    author: String,
    book: String,
    tag: String,
    relationship: &'static str,
    striped: bool,
}

impl SelectView {
    fn new(name: &'static str, label: &'static str, values: Vec<String>, current: Option<&str>) -> Self {
        Self {
            name,
            label,
            all_selected: current.is_none(),
            options: values
                .into_iter()
                .map(|value| OptionView { selected: current == Some(value.as_str()), value })
                .collect(),
        }
    }
}

impl RowView {
    fn from_row(index: usize, row: &RelationshipRow) -> Self {
        Self {
            author: row.author.clone(),
            book: row.book.clone(),
            tag: row.tag.clone().unwrap_or_else(|| "-".to_string()),
            relationship: row.relationship.as_str(),
            striped: index % 2 == 0,
        }
    }
}

fn selects(options: FilterOptions, filters: &Filters) -> Vec<SelectView> {
    vec![
        SelectView::new("author", "Author", options.authors, filters.author()),
        SelectView::new("book", "Book", options.books, filters.book()),
        SelectView::new("tag", "Tag", options.tags, filters.tag()),
        SelectView::new(
            "relationship",
            "Relationship",
            options.relationships.iter().map(|r| r.as_str().to_string()).collect(),
            filters.relationship(),
        ),
    ]
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the filtered relationship table.
pub async fn index(
    State(state): State<AppState>,
    Query(filters): Query<Filters>,
) -> Response {
    let (status, template) = match state.load_records().await {
        Ok(records) => {
            let rows = flatten(&records);
            let options = FilterOptions::from_rows(&rows);
            let template = TableTemplate {
                failed: false,
                message: String::new(),
                selects: selects(options, &filters),
                rows: filters
                    .filter_rows(&rows)
                    .iter()
                    .enumerate()
                    .map(|(i, row)| RowView::from_row(i, row))
                    .collect(),
            };
            (StatusCode::OK, template)
        }
        Err(e) => {
            let (status, message) = load_failure(e);
            let template = TableTemplate {
                failed: true,
                message,
                selects: selects(FilterOptions::from_rows(&[]), &filters),
                rows: Vec::new(),
            };
            (status, template)
        }
    };

    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!(error = %e, "Template error");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(format!("Template error: {}", e))).into_response()
        }
    }
}
