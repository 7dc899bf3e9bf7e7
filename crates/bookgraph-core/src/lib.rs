//! Bookgraph Core Library
//!
//! Turns author/book/tag records fetched from the graph database into the
//! models the views render: flattened relationship rows for the table and
//! deduplicated node/edge elements for the graph.

pub mod builder;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod model;
pub mod options;
pub mod view;

pub use builder::{GraphModel, GraphModelBuilder, NodeIdentity};
pub use error::{CoreError, CoreResult};
pub use filter::Filters;
pub use flatten::flatten;
pub use model::{Edge, GraphElement, GraphPayload, GraphRecord, Node, NodeKind, Relationship, RelationshipRow};
pub use options::FilterOptions;
pub use view::{Generations, Ticket, ViewSlot, ViewState, LOAD_FAILURE};
