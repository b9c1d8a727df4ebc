//! The stored edge type (§3.1).

use graphq_common::hash::FxHashMap;
use graphq_common::types::{EdgeId, NodeId, PropertyKey, Timestamp, Value};
use serde::{Deserialize, Serialize};

/// A stored edge.
///
/// `id`, `edge_type`, `from_id` and `to_id` are immutable after creation.
/// An edge is always removed by the store when either endpoint is removed
/// (§3.1 cascade invariant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// The edge's opaque, immutable identity.
    pub id: EdgeId,
    /// The edge's immutable type.
    pub edge_type: String,
    /// The source node id.
    pub from_id: NodeId,
    /// The target node id.
    pub to_id: NodeId,
    /// The edge's properties.
    pub properties: FxHashMap<PropertyKey, Value>,
    /// When the edge was created.
    pub created_at: Timestamp,
}

impl Edge {
    /// Builds a new edge with no properties.
    #[must_use]
    pub fn new(
        id: EdgeId,
        edge_type: impl Into<String>,
        from_id: NodeId,
        to_id: NodeId,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            edge_type: edge_type.into(),
            from_id,
            to_id,
            properties: FxHashMap::default(),
            created_at: now,
        }
    }

    /// Returns the value of a property, or `None` if unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
