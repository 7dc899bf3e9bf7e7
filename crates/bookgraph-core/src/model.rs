//! Record, row and graph element models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One author/book pair with the tags of the book, as returned by the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRecord {
    pub author: String,
    pub book: String,
    pub tags: Vec<String>,
}

impl GraphRecord {
    pub fn new(author: impl Into<String>, book: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            author: author.into(),
            book: book.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Body of `GET /api/graph`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphPayload {
    pub data: Vec<GraphRecord>,
}

/// Relationship kinds present in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relationship {
    Wrote,
    TaggedAs,
}

impl Relationship {
    pub const ALL: [Relationship; 2] = [Relationship::Wrote, Relationship::TaggedAs];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrote => "WROTE",
            Self::TaggedAs => "TAGGED_AS",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single flattened relationship fact.
///
/// `tag` is `None` for `WROTE` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRow {
    pub author: String,
    pub book: String,
    pub tag: Option<String>,
    pub relationship: Relationship,
}

/// Kind of entity a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Author,
    Book,
    Tag,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
            Self::Tag => "tag",
        }
    }
}

/// A renderable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// A renderable directed edge. `id` is always `"{source}->{target}"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: Relationship,
}

impl Edge {
    pub fn new(source: &str, target: &str, label: Relationship) -> Self {
        Self {
            id: format!("{}->{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            label,
        }
    }
}

/// Element definition in the `{"data": {...}}` shape the layout library expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphElement {
    Edge { data: Edge },
    Node { data: Node },
}

impl GraphElement {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node { data } => Some(data),
            Self::Edge { .. } => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Self::Edge { data } => Some(data),
            Self::Node { .. } => None,
        }
    }
}
