//! Bookgraph Web Server
//!
//! Axum-based server for the relationship table, the graph view and the
//! JSON API behind them.

pub mod layout;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/graph", get(routes::api::get_graph))
        .route("/rows", get(routes::api::get_rows))
        .route("/elements", get(routes::api::get_elements))
        .with_state(state.clone());

    Router::new()
        .route("/", get(routes::table_html::index))
        .route("/graph", get(routes::graph_html::graph_page))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the web server.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Web server listening on http://{}:{}", host, port);

    axum::serve(listener, app).await?;
    Ok(())
}
