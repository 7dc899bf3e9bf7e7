//! JSON API handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use bookgraph_core::{flatten, Filters, FilterOptions, GraphElement, GraphPayload, RelationshipRow};
use serde::Serialize;

use super::load_failure;
use crate::state::AppState;

/// Filtered table rows, stamped with the request generation.
#[derive(Serialize)]
pub struct RowsResponse {
    pub generation: u64,
    pub rows: Vec<RelationshipRow>,
    pub options: FilterOptions,
}

/// Graph elements, stamped with the request generation.
#[derive(Serialize)]
pub struct ElementsResponse {
    pub generation: u64,
    pub elements: Vec<GraphElement>,
}

/// GET /api/graph - Raw records.
pub async fn get_graph(
    State(state): State<AppState>,
) -> Result<Json<GraphPayload>, (StatusCode, String)> {
    let data = state.load_records().await.map_err(load_failure)?;
    Ok(Json(GraphPayload { data }))
}

/// GET /api/rows - Flattened rows after the row-level filter.
pub async fn get_rows(
    State(state): State<AppState>,
    Query(filters): Query<Filters>,
) -> Result<Json<RowsResponse>, (StatusCode, String)> {
    let generation = state.generations.next();
    let records = state.load_records().await.map_err(load_failure)?;

    let rows = flatten(&records);
    let options = FilterOptions::from_rows(&rows);

    Ok(Json(RowsResponse {
        generation,
        rows: filters.filter_rows(&rows),
        options,
    }))
}

/// GET /api/elements - Graph elements after the record-level filter.
pub async fn get_elements(
    State(state): State<AppState>,
    Query(filters): Query<Filters>,
) -> Result<Json<ElementsResponse>, (StatusCode, String)> {
    let generation = state.generations.next();
    let records = state.load_records().await.map_err(load_failure)?;

    let filtered = filters.filter_records(&records);
    let model = state.builder.build(&filtered, &filters);

    Ok(Json(ElementsResponse {
        generation,
        elements: model.elements,
    }))
}
