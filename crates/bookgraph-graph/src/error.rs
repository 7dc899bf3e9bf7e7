//! Gateway error types.

use thiserror::Error;

/// Failures while reading records.
///
/// Callers showing data to users collapse all of these into one message.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for gateway operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl From<neo4rs::Error> for GraphError {
    fn from(e: neo4rs::Error) -> Self {
        match &e {
            neo4rs::Error::IOError { .. } | neo4rs::Error::ConnectionError => Self::Connection(e.to_string()),
            _ => Self::Query(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for GraphError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Connection(e.to_string())
        }
    }
}
