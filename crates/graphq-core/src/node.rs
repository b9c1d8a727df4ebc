//! The stored node type (§3.1).

use graphq_common::hash::FxHashMap;
use graphq_common::types::{NodeId, PropertyKey, Timestamp, Value};
use serde::{Deserialize, Serialize};

/// A stored node.
///
/// `id` and `label` are immutable after creation; `properties` may be
/// updated through [`crate::store::GraphStore::update_node`], which also
/// bumps `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// The node's opaque, immutable identity.
    pub id: NodeId,
    /// The node's immutable label.
    pub label: String,
    /// The node's properties.
    pub properties: FxHashMap<PropertyKey, Value>,
    /// When the node was created.
    pub created_at: Timestamp,
    /// When the node was last updated.
    pub updated_at: Timestamp,
}

impl Node {
    /// Builds a new node with no properties, stamping `created_at` and
    /// `updated_at` to the same moment.
    #[must_use]
    pub fn new(id: NodeId, label: impl Into<String>, now: Timestamp) -> Self {
        Self {
            id,
            label: label.into(),
            properties: FxHashMap::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the value of a property, or `None` if unset.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
