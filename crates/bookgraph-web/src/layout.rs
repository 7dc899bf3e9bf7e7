//! Force-directed layout configuration handed to the graph page.

use serde::Serialize;

/// `cose-bilkent` options, serialized with the library's camelCase keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub name: &'static str,
    pub animate: &'static str,
    pub fit: bool,
    pub padding: u32,
    pub node_repulsion: u32,
    pub ideal_edge_length: u32,
    pub edge_elasticity: f64,
    pub nesting_factor: f64,
    pub gravity: f64,
    pub num_iter: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            name: "cose-bilkent",
            animate: "end",
            fit: true,
            padding: 120,
            node_repulsion: 300_000,
            ideal_edge_length: 300,
            edge_elasticity: 0.1,
            nesting_factor: 1.2,
            gravity: 0.15,
            num_iter: 3000,
        }
    }
}
