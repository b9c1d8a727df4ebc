//! The passive, serializable store representation (§6.3).

use crate::edge::Edge;
use crate::node::Node;
use serde::{Deserialize, Serialize};

/// A serializable snapshot of every node and edge in a store.
///
/// `import(export(store)) == store` in terms of nodes, edges and adjacency
/// (invariant 11, §8); `import` rebuilds every index from the imported
/// entities rather than trusting any index state encoded alongside them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportedGraph {
    /// Every stored node, in insertion order.
    pub nodes: Vec<Node>,
    /// Every stored edge, in insertion order.
    pub edges: Vec<Edge>,
}
