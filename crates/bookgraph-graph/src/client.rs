//! Neo4j connection client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{GraphError, GraphResult};

pub const URI_VAR: &str = "NEO4J_URI";
pub const USER_VAR: &str = "NEO4J_USER";
pub const PASSWORD_VAR: &str = "NEO4J_PASSWORD";
pub const DATABASE_VAR: &str = "NEO4J_DATABASE";

const DEFAULT_DATABASE: &str = "neo4j";

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl GraphConfig {
    /// Read the connection settings from the process environment.
    ///
    /// URI, user and password are required; the database defaults to `neo4j`.
    pub fn from_env() -> GraphResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// Every missing variable is reported, not only the first one.
    pub fn from_lookup<F>(lookup: F) -> GraphResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let uri = get(URI_VAR);
        let user = get(USER_VAR);
        let password = get(PASSWORD_VAR);

        match (uri, user, password) {
            (Some(uri), Some(user), Some(password)) => Ok(Self {
                uri,
                user,
                password,
                database: get(DATABASE_VAR).unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            }),
            (uri, user, password) => {
                let missing: Vec<&str> = [(URI_VAR, uri.is_none()), (USER_VAR, user.is_none()), (PASSWORD_VAR, password.is_none())]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                Err(GraphError::Config(format!(
                    "Missing Neo4j environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Client for the author/book/tag graph.
///
/// Constructed explicitly and passed to whoever needs it; there is no
/// process-wide driver.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs builds its pool lazily, so a `RETURN 1` ping runs right away to
    /// surface an unreachable server here instead of on the first request.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(4)
            .fetch_size(50)
            .build()
            .map_err(|e| GraphError::Config(e.to_string()))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| GraphError::Connection(format!("Neo4j is not responding to queries: {}", e)))?;

        info!(uri = %config.uri, database = %config.database, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Execute a read query and collect every row.
    ///
    /// The session backing the stream goes back to the pool when the stream is
    /// dropped, which happens on every return path of this function.
    pub async fn query(&self, query: Query) -> GraphResult<Vec<neo4rs::Row>> {
        let mut stream = self.graph.execute(query).await?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        debug!(rows = rows.len(), "Neo4j query complete");
        Ok(rows)
    }

    /// Count authors, books and tags for status display.
    pub async fn counts(&self) -> GraphResult<GraphCounts> {
        let query = Query::new(
            "OPTIONAL MATCH (a:Author) WITH count(a) AS authors
             OPTIONAL MATCH (b:Book) WITH authors, count(b) AS books
             OPTIONAL MATCH (t:Tag)
             RETURN authors, books, count(t) AS tags"
                .to_string(),
        );

        let row = self
            .query(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::Decode("count query returned no rows".to_string()))?;

        let field = |name: &str| -> GraphResult<usize> {
            let value: i64 = row
                .get(name)
                .map_err(|e| GraphError::Decode(format!("Failed to get field '{}': {:?}", name, e)))?;
            Ok(value.max(0) as usize)
        };

        Ok(GraphCounts {
            authors: field("authors")?,
            books: field("books")?,
            tags: field("tags")?,
        })
    }
}

/// Entity counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCounts {
    pub authors: usize,
    pub books: usize,
    pub tags: usize,
}
