//! Shared depth-first walking machinery for variable-length traversal
//! (§4.3.2) and transitive-closure reachability (§4.3.5).
//!
//! Hierarchy's ancestor/descendant walk (§4.3.3) has its own per-path
//! short-circuiting logic for `untilKind` and lives in `steps::hierarchy`,
//! but reuses [`edges_with_targets`] to resolve one hop.

use graphq_ast::{EdgeDirection, Uniqueness};
use graphq_common::hash::FxHashSet;
use graphq_common::types::{EdgeId, NodeId};
use graphq_core::{Edge, GraphStore};

/// Resolves every edge of `node_id` matching `edge_types` (empty = any
/// type) and `direction`, paired with the neighbor node id at its far end
/// (§4.3.2 step 5: "target = edge.fromId if direction == in else
/// edge.toId").
pub(crate) fn edges_with_targets(
    store: &GraphStore,
    node_id: &NodeId,
    edge_types: &[String],
    direction: EdgeDirection,
) -> Vec<(Edge, NodeId)> {
    let type_filters: Vec<Option<&str>> = if edge_types.is_empty() {
        vec![None]
    } else {
        edge_types.iter().map(|t| Some(t.as_str())).collect()
    };

    let mut out = Vec::new();
    if matches!(direction, EdgeDirection::Out | EdgeDirection::Both) {
        for t in &type_filters {
            for edge in store.outgoing(node_id, *t) {
                let target = edge.to_id.clone();
                out.push((edge, target));
            }
        }
    }
    if matches!(direction, EdgeDirection::In | EdgeDirection::Both) {
        for t in &type_filters {
            for edge in store.incoming(node_id, *t) {
                let target = edge.from_id.clone();
                out.push((edge, target));
            }
        }
    }
    out
}

/// One visited node at some depth along a walk, with the edge that reached
/// it (absent only for the `include_self` depth-0 entry).
pub(crate) struct Visit {
    pub node_id: NodeId,
    pub depth: u32,
    pub edge: Option<Edge>,
}

/// Performs a depth-first walk from `start`, collecting every node visited
/// within `[min_depth, effective_max_depth]`. `effective_max_depth` is
/// already clamped to the engine's recursion cap by the caller, which is
/// also responsible for emitting the truncation warning (§7.1) when the
/// caller's requested bound exceeded it.
///
/// The walk does not reset its uniqueness bookkeeping between branches of
/// the recursion (§4.3.2: "does NOT reset uniqueness between roots").
pub(crate) fn depth_first_walk(
    store: &GraphStore,
    start: &NodeId,
    edge_types: &[String],
    direction: EdgeDirection,
    min_depth: u32,
    effective_max_depth: u32,
    uniqueness: Uniqueness,
) -> Vec<Visit> {
    let mut out = Vec::new();
    let mut visited_nodes: FxHashSet<NodeId> = FxHashSet::default();
    let mut visited_edges: FxHashSet<EdgeId> = FxHashSet::default();
    visited_nodes.insert(start.clone());

    walk_from(
        store,
        start,
        edge_types,
        direction,
        1,
        min_depth,
        effective_max_depth,
        uniqueness,
        &mut visited_nodes,
        &mut visited_edges,
        &mut out,
    );
    out
}

#[allow(clippy::too_many_arguments)]
fn walk_from(
    store: &GraphStore,
    current: &NodeId,
    edge_types: &[String],
    direction: EdgeDirection,
    depth: u32,
    min_depth: u32,
    max_depth: u32,
    uniqueness: Uniqueness,
    visited_nodes: &mut FxHashSet<NodeId>,
    visited_edges: &mut FxHashSet<EdgeId>,
    out: &mut Vec<Visit>,
) {
    if depth > max_depth {
        return;
    }

    for (edge, target_id) in edges_with_targets(store, current, edge_types, direction) {
        if uniqueness == Uniqueness::Edges && !visited_edges.insert(edge.id.clone()) {
            continue;
        }
        if uniqueness == Uniqueness::Nodes {
            if visited_nodes.contains(&target_id) {
                continue;
            }
            visited_nodes.insert(target_id.clone());
        }
        if store.get_node(&target_id).is_none() {
            continue;
        }

        if depth >= min_depth {
            out.push(Visit { node_id: target_id.clone(), depth, edge: Some(edge) });
        }

        walk_from(
            store,
            &target_id,
            edge_types,
            direction,
            depth + 1,
            min_depth,
            max_depth,
            uniqueness,
            visited_nodes,
            visited_edges,
            out,
        );
    }
}
