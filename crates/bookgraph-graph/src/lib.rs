//! # Bookgraph Graph
//!
//! Read access to the author/book/tag graph.
//!
//! Provides the Neo4j client, the fixed records query, and the
//! [`RecordSource`] abstraction the web server and CLI fetch through.

pub mod client;
pub mod error;
pub mod queries;
pub mod remote;
pub mod source;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use error::{GraphError, GraphResult};
pub use remote::RemoteSource;
pub use source::{RecordSource, StaticSource};
