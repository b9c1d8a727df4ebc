//! The consumer-contract schema descriptor (§6.2, §6.2.2).
//!
//! These are inert data values: constructing, inspecting and serializing a
//! [`Schema`] never touches a store or engine. Validation against it is the
//! responsibility of an external mutation caller — this crate only keeps
//! [`crate::error::Error::SchemaValidation`] in its taxonomy for that
//! caller's benefit.

use crate::hash::FxHashMap;
use crate::types::{LogicalType, PropertyKey};
use serde::{Deserialize, Serialize};

/// The expected property shape for a label or edge type: property name to
/// expected [`LogicalType`].
pub type PropertyShape = FxHashMap<PropertyKey, LogicalType>;

/// Describes the expected property shape of nodes carrying a given label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeTypeSchema {
    /// The node label this schema describes.
    pub label: String,
    /// Expected property shape.
    pub properties: PropertyShape,
}

/// How many edges of a given type may connect two node types.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cardinality {
    /// At most one edge of this type per source node.
    OneToOne,
    /// A source node may have many such edges, each target at most one.
    OneToMany,
    /// A target node may have many such edges, each source at most one.
    ManyToOne,
    /// No cardinality restriction.
    ManyToMany,
}

/// Describes the expected shape of edges carrying a given type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeTypeSchema {
    /// The edge type this schema describes.
    pub edge_type: String,
    /// The expected label of the edge's source node.
    pub from_label: String,
    /// The expected label of the edge's target node.
    pub to_label: String,
    /// The expected cardinality between the two node types.
    pub cardinality: Cardinality,
    /// Expected property shape.
    pub properties: PropertyShape,
}

/// A complete schema descriptor: every known node label and edge type,
/// together with their expected property shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    node_types: FxHashMap<String, NodeTypeSchema>,
    edge_types: FxHashMap<String, EdgeTypeSchema>,
}

impl Schema {
    /// Builds an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a node type descriptor.
    pub fn with_node_type(mut self, schema: NodeTypeSchema) -> Self {
        self.node_types.insert(schema.label.clone(), schema);
        self
    }

    /// Registers (or replaces) an edge type descriptor.
    pub fn with_edge_type(mut self, schema: EdgeTypeSchema) -> Self {
        self.edge_types.insert(schema.edge_type.clone(), schema);
        self
    }

    /// Looks up the descriptor for a node label.
    #[must_use]
    pub fn node_type(&self, label: &str) -> Option<&NodeTypeSchema> {
        self.node_types.get(label)
    }

    /// Looks up the descriptor for an edge type.
    #[must_use]
    pub fn edge_type(&self, edge_type: &str) -> Option<&EdgeTypeSchema> {
        self.edge_types.get(edge_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_round_trips_through_json() {
        let schema = Schema::new().with_node_type(NodeTypeSchema {
            label: "person".into(),
            properties: FxHashMap::from_iter([(PropertyKey::new("name"), LogicalType::String)]),
        });

        let json = serde_json::to_string(&schema).unwrap();
        let back: Schema = serde_json::from_str(&json).unwrap();
        assert!(back.node_type("person").is_some());
    }
}
