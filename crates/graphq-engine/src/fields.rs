//! Resolves a `"id"`-or-property field name against a stored node/edge
//! (§4.3.4, §4.3.6, §4.3.7) into an owned [`Value`] for comparison.

use graphq_common::types::Value;
use graphq_core::{Edge, Node};

/// Reads `field` off `node`: `"id"` yields the node's id as a string value,
/// anything else is a property lookup.
#[must_use]
pub fn node_field(node: &Node, field: &str) -> Option<Value> {
    if field == "id" {
        Some(Value::String(node.id.to_string()))
    } else {
        node.get(field).cloned()
    }
}

/// Reads `field` off `edge`: `"id"` and `"type"` are synthetic, anything
/// else is a property lookup.
#[must_use]
pub fn edge_field(edge: &Edge, field: &str) -> Option<Value> {
    match field {
        "id" => Some(Value::String(edge.id.to_string())),
        "type" => Some(Value::String(edge.edge_type.clone())),
        other => edge.get(other).cloned(),
    }
}
