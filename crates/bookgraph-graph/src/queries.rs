//! The fixed author/book/tag read query.

use bookgraph_core::GraphRecord;
use neo4rs::{Query, Row};

use crate::error::{GraphError, GraphResult};
use crate::GraphClient;

/// Upper bound on records returned per fetch.
pub const RECORD_LIMIT: i64 = 50;

/// One row per (author, book) with the book's tags collected into a list.
pub const RECORDS_QUERY: &str = "MATCH (a:Author)-[:WROTE]->(b:Book)-[:TAGGED_AS]->(t:Tag)
     RETURN a.name AS author, b.title AS book, collect(t.name) AS tags
     LIMIT $limit";

fn records_query() -> Query {
    Query::new(RECORDS_QUERY.to_string()).param("limit", RECORD_LIMIT)
}

/// Run [`RECORDS_QUERY`] and decode every row.
pub async fn fetch_records(client: &GraphClient) -> GraphResult<Vec<GraphRecord>> {
    let rows = client.query(records_query()).await?;
    rows.iter().map(decode_record).collect()
}

fn decode_record(row: &Row) -> GraphResult<GraphRecord> {
    let missing = |name: &str, e: neo4rs::DeError| {
        GraphError::Decode(format!("Failed to get field '{}': {:?}", name, e))
    };

    Ok(GraphRecord {
        author: row.get("author").map_err(|e| missing("author", e))?,
        book: row.get("book").map_err(|e| missing("book", e))?,
        tags: row.get("tags").map_err(|e| missing("tags", e))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use neo4rs::{BoltList, BoltType};

    fn row(fields: &[(&str, BoltType)]) -> Row {
        let names = fields.iter().map(|(name, _)| BoltType::from(*name)).collect::<Vec<_>>();
        let values = fields.iter().map(|(_, value)| value.clone()).collect::<Vec<_>>();
        Row::new(BoltList::from(names), BoltList::from(values))
    }

    fn tags(values: &[&str]) -> BoltType {
        BoltType::List(BoltList::from(values.iter().map(|v| BoltType::from(*v)).collect::<Vec<_>>()))
    }

    #[test]
    fn test_query_is_bounded() {
        assert!(RECORDS_QUERY.ends_with("LIMIT $limit"));
    }

    #[test]
    fn test_decode_record() {
        let row = row(&[
            ("author", BoltType::from("Ursula K. Le Guin")),
            ("book", BoltType::from("The Dispossessed")),
            ("tags", tags(&["sci-fi", "utopia"])),
        ]);
        assert_eq!(
            decode_record(&row).unwrap(),
            GraphRecord::new("Ursula K. Le Guin", "The Dispossessed", &["sci-fi", "utopia"])
        );
    }

    #[test]
    fn test_missing_tags_is_decode_error() {
        let row = row(&[("author", BoltType::from("A")), ("book", BoltType::from("B1"))]);
        let err = decode_record(&row).unwrap_err();
        assert!(matches!(&err, GraphError::Decode(msg) if msg.contains("tags")), "{err:?}");
    }

    #[test]
    fn test_wrongly_typed_tags_is_decode_error() {
        let row = row(&[
            ("author", BoltType::from("A")),
            ("book", BoltType::from("B1")),
            ("tags", BoltType::from("sci-fi")),
        ]);
        assert!(matches!(decode_record(&row), Err(GraphError::Decode(_))));
    }

    #[test]
    fn test_query_returns_expected_columns() {
        for column in ["AS author", "AS book", "AS tags"] {
            assert!(RECORDS_QUERY.contains(column), "missing {}", column);
        }
    }
}
