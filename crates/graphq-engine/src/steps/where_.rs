//! `Where` condition evaluation (§4.3.4).

use crate::compare::apply_comparison;
use crate::fields::node_field;
use crate::row::Row;
use graphq_ast::{Condition, EdgeDirection, LogicalOp};
use graphq_common::types::NodeId;
use graphq_core::GraphStore;

pub(crate) fn apply_where(rows: Vec<Row>, conditions: &[Condition], store: &GraphStore) -> Vec<Row> {
    rows.into_iter().filter(|row| conditions.iter().all(|c| eval(row, c, store))).collect()
}

fn eval(row: &Row, condition: &Condition, store: &GraphStore) -> bool {
    match condition {
        Condition::Comparison { target, field, op, value } => {
            let Some(node) = row.node(target) else { return false };
            let actual = node_field(node, field);
            apply_comparison(actual.as_ref(), *op, value.as_ref())
        }
        Condition::Logical { op, children } => match op {
            LogicalOp::And => children.iter().all(|c| eval(row, c, store)),
            LogicalOp::Or => children.iter().any(|c| eval(row, c, store)),
            // NOT is the negation of the conjunction of its children (§9
            // open question, pinned by the spec).
            LogicalOp::Not => !children.iter().all(|c| eval(row, c, store)),
        },
        Condition::Exists { target, edge_type, direction, negated } => {
            let Some(node) = row.node(target) else { return false };
            let found = has_any_edge(store, &node.id, edge_type.as_deref(), *direction);
            if *negated { !found } else { found }
        }
        Condition::ConnectedTo { target, edge_type, direction, node_id } => {
            let Some(node) = row.node(target) else { return false };
            connected_to(store, &node.id, edge_type.as_deref(), *direction, node_id)
        }
    }
}

fn has_any_edge(store: &GraphStore, node_id: &NodeId, edge_type: Option<&str>, direction: EdgeDirection) -> bool {
    match direction {
        EdgeDirection::Out => !store.outgoing(node_id, edge_type).is_empty(),
        EdgeDirection::In => !store.incoming(node_id, edge_type).is_empty(),
        EdgeDirection::Both => {
            !store.outgoing(node_id, edge_type).is_empty() || !store.incoming(node_id, edge_type).is_empty()
        }
    }
}

fn connected_to(
    store: &GraphStore,
    node_id: &NodeId,
    edge_type: Option<&str>,
    direction: EdgeDirection,
    peer_id: &str,
) -> bool {
    let peer = NodeId::new(peer_id);
    match direction {
        EdgeDirection::Out => store.outgoing(node_id, edge_type).iter().any(|e| e.to_id == peer),
        EdgeDirection::In => store.incoming(node_id, edge_type).iter().any(|e| e.from_id == peer),
        EdgeDirection::Both => {
            store.outgoing(node_id, edge_type).iter().any(|e| e.to_id == peer)
                || store.incoming(node_id, edge_type).iter().any(|e| e.from_id == peer)
        }
    }
}
