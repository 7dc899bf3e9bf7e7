//! Builds the deduplicated node/edge element set for the graph view.

use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::filter::Filters;
use crate::model::{Edge, GraphElement, GraphRecord, Node, NodeKind, Relationship};

/// How node identifiers are derived from entity labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeIdentity {
    /// The label is the identifier. A tag named like a book shares its node.
    #[default]
    Label,
    /// `kind:label`, so entities of different kinds never collide.
    Namespaced,
}

impl NodeIdentity {
    fn node_id(&self, kind: NodeKind, label: &str) -> String {
        match self {
            Self::Label => label.to_string(),
            Self::Namespaced => format!("{}:{}", kind.as_str(), label),
        }
    }
}

impl FromStr for NodeIdentity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "label" => Ok(Self::Label),
            "namespaced" => Ok(Self::Namespaced),
            other => Err(CoreError::UnknownIdentity(other.to_string())),
        }
    }
}

/// Ordered element set produced by [`GraphModelBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GraphModel {
    pub elements: Vec<GraphElement>,
}

impl GraphModel {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.elements.iter().filter_map(GraphElement::as_node)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.elements.iter().filter_map(GraphElement::as_edge)
    }

    /// Serialize for embedding inside an HTML `<script>` block.
    ///
    /// `<` is escaped so a label can never close the surrounding tag.
    pub fn to_script_json(&self) -> CoreResult<String> {
        let json = serde_json::to_string(&self.elements)?;
        Ok(json.replace('<', "\\u003c"))
    }
}

/// Accumulates nodes and edges while remembering which ids were emitted.
struct ElementSet {
    identity: NodeIdentity,
    nodes: HashSet<String>,
    edges: HashSet<String>,
    elements: Vec<GraphElement>,
}

impl ElementSet {
    fn node(&mut self, kind: NodeKind, label: &str) -> String {
        let id = self.identity.node_id(kind, label);
        if self.nodes.insert(id.clone()) {
            self.elements.push(GraphElement::Node {
                data: Node { id: id.clone(), label: label.to_string(), kind },
            });
        }
        id
    }

    fn edge(&mut self, source: &str, target: &str, label: Relationship) {
        let edge = Edge::new(source, target, label);
        if self.edges.insert(edge.id.clone()) {
            self.elements.push(GraphElement::Edge { data: edge });
        }
    }
}

/// Builds graph elements from (already filtered) records.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphModelBuilder {
    identity: NodeIdentity,
}

impl GraphModelBuilder {
    pub fn new(identity: NodeIdentity) -> Self {
        Self { identity }
    }

    /// Build the element set.
    ///
    /// Author and book nodes are always emitted for each record. The
    /// relationship predicate of `filters` decides which edge kinds appear;
    /// tag nodes only appear together with their `TAGGED_AS` edges.
    pub fn build(&self, records: &[GraphRecord], filters: &Filters) -> GraphModel {
        let mut set = ElementSet {
            identity: self.identity,
            nodes: HashSet::new(),
            edges: HashSet::new(),
            elements: Vec::new(),
        };
        let wrote = filters.includes_edges(Relationship::Wrote);
        let tagged = filters.includes_edges(Relationship::TaggedAs);

        for record in records {
            let author = set.node(NodeKind::Author, &record.author);
            let book = set.node(NodeKind::Book, &record.book);

            if wrote {
                set.edge(&author, &book, Relationship::Wrote);
            }
            if tagged && !record.tags.is_empty() {
                for tag in &record.tags {
                    let tag = set.node(NodeKind::Tag, tag);
                    set.edge(&book, &tag, Relationship::TaggedAs);
                }
            }
        }

        debug!(
            records = records.len(),
            elements = set.elements.len(),
            identity = ?self.identity,
            "Built graph model"
        );
        GraphModel { elements: set.elements }
    }
}
