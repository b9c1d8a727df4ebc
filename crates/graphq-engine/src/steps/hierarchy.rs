//! `Hierarchy` (§4.3.3): `parent`/`children`/`ancestors`/`descendants`/
//! `siblings`/`root` over a single edge type with a declared tree
//! direction.

use crate::row::Row;
use crate::walk::edges_with_targets;
use graphq_ast::{EdgeDirection, HierarchyDirection, HierarchyOp, HierarchySpec};
use graphq_common::config::EngineConfig;
use graphq_common::types::{NodeId, Value};
use graphq_core::{GraphStore, Node};
use tracing::warn;

/// `up` means the edge points child -> parent, so walking "toward the
/// parent" follows the edge's natural (outgoing) direction, and walking
/// "toward children" follows it backward (incoming).
fn parent_direction(tree_direction: HierarchyDirection) -> EdgeDirection {
    match tree_direction {
        HierarchyDirection::Up => EdgeDirection::Out,
        HierarchyDirection::Down => EdgeDirection::In,
    }
}

fn child_direction(tree_direction: HierarchyDirection) -> EdgeDirection {
    match tree_direction {
        HierarchyDirection::Up => EdgeDirection::In,
        HierarchyDirection::Down => EdgeDirection::Out,
    }
}

pub(crate) fn apply_hierarchy(
    rows: Vec<Row>,
    spec: &HierarchySpec,
    store: &GraphStore,
    config: &EngineConfig,
) -> Vec<Row> {
    let mut out = Vec::new();
    for row in rows {
        let Some(source) = row.node(&spec.from) else { continue };
        let source_id = source.id.clone();

        let matches = match spec.operation {
            HierarchyOp::Parent => parent_of(store, &source_id, spec).into_iter().collect::<Vec<_>>(),
            HierarchyOp::Children => children_of(store, &source_id, spec),
            HierarchyOp::Ancestors => ancestors_or_descendants(store, &source_id, spec, config, true),
            HierarchyOp::Descendants => ancestors_or_descendants(store, &source_id, spec, config, false),
            HierarchyOp::Siblings => siblings_of(store, &source_id, spec),
            HierarchyOp::Root => root_of(store, &source_id, spec, config).into_iter().collect(),
        };

        for (node, depth) in matches {
            let mut next = row.clone();
            bind_result(&mut next, spec, config, node, depth);
            out.push(next);
        }
    }
    out
}

fn bind_result(row: &mut Row, spec: &HierarchySpec, config: &EngineConfig, node: Node, depth: u32) {
    row.bind_node(&spec.to, node);
    if spec.include_depth {
        let key = spec.depth_alias.clone().unwrap_or_else(|| config.default_depth_alias().to_string());
        row.set_computed(key, Value::Int(i64::from(depth)));
    }
}

fn parent_of(store: &GraphStore, source_id: &NodeId, spec: &HierarchySpec) -> Option<(Node, u32)> {
    let direction = parent_direction(spec.direction);
    edges_with_targets(store, source_id, std::slice::from_ref(&spec.edge_type), direction)
        .into_iter()
        .find_map(|(_, target_id)| store.get_node(&target_id).map(|n| (n, 1)))
}

fn children_of(store: &GraphStore, source_id: &NodeId, spec: &HierarchySpec) -> Vec<(Node, u32)> {
    let direction = child_direction(spec.direction);
    edges_with_targets(store, source_id, std::slice::from_ref(&spec.edge_type), direction)
        .into_iter()
        .filter_map(|(_, target_id)| store.get_node(&target_id))
        .map(|n| (n, 1))
        .collect()
}

fn siblings_of(store: &GraphStore, source_id: &NodeId, spec: &HierarchySpec) -> Vec<(Node, u32)> {
    let Some((parent, _)) = parent_of(store, source_id, spec) else {
        return Vec::new();
    };
    children_of(store, &parent.id, spec)
        .into_iter()
        .filter(|(n, _)| &n.id != source_id)
        .collect()
}

fn root_of(store: &GraphStore, source_id: &NodeId, spec: &HierarchySpec, config: &EngineConfig) -> Option<(Node, u32)> {
    let cap = spec.max_depth.unwrap_or(config.max_recursion_depth() as u32).min(config.max_recursion_depth() as u32);
    let mut current = source_id.clone();
    let mut depth = 0;
    loop {
        if depth >= cap {
            if spec.max_depth.is_none_or(|m| m > cap) {
                warn!(cap, "hierarchy root walk truncated at recursion cap");
            }
            break;
        }
        match parent_of(store, &current, spec) {
            Some((parent, _)) => {
                current = parent.id.clone();
                depth += 1;
            }
            None => break,
        }
    }
    store.get_node(&current).map(|n| (n, depth))
}

fn ancestors_or_descendants(
    store: &GraphStore,
    source_id: &NodeId,
    spec: &HierarchySpec,
    config: &EngineConfig,
    ascending: bool,
) -> Vec<(Node, u32)> {
    let direction = if ascending { parent_direction(spec.direction) } else { child_direction(spec.direction) };
    let min_depth = spec.min_depth.unwrap_or(0);
    let requested_max = spec.max_depth.unwrap_or(config.max_recursion_depth() as u32);
    let cap = config.max_recursion_depth() as u32;
    let effective_max = requested_max.min(cap);
    if requested_max > cap {
        warn!(cap, requested = requested_max, "hierarchy walk truncated at recursion cap");
    }

    let mut out = Vec::new();
    if spec.include_self && min_depth == 0 {
        if let Some(self_node) = store.get_node(source_id) {
            out.push((self_node, 0));
        }
    }

    let mut visited: graphq_common::hash::FxHashSet<NodeId> = graphq_common::hash::FxHashSet::default();
    visited.insert(source_id.clone());
    walk_paths(store, source_id, &spec.edge_type, direction, 1, effective_max, min_depth, spec.until_kind.as_deref(), &mut visited, &mut out);
    out
}

/// Walks one hop at a time, tracking a visited node-id set (§4.3.3:
/// "repeated one-hop walks with visited set of node-ids") so a cyclic
/// hierarchy edge cannot recurse forever or emit the same node twice.
#[allow(clippy::too_many_arguments)]
fn walk_paths(
    store: &GraphStore,
    current: &NodeId,
    edge_type: &str,
    direction: EdgeDirection,
    depth: u32,
    max_depth: u32,
    min_depth: u32,
    until_kind: Option<&str>,
    visited: &mut graphq_common::hash::FxHashSet<NodeId>,
    out: &mut Vec<(Node, u32)>,
) {
    if depth > max_depth {
        return;
    }
    for (_, target_id) in edges_with_targets(store, current, std::slice::from_ref(&edge_type.to_string()), direction) {
        if !visited.insert(target_id.clone()) {
            continue;
        }
        let Some(target) = store.get_node(&target_id) else { continue };

        let matches_until = until_kind.is_some_and(|kind| target.label == kind);
        if depth >= min_depth && (until_kind.is_none() || matches_until) {
            out.push((target.clone(), depth));
        }
        // Once a path satisfies `untilKind`, it stops there (§4.3.3); an
        // unmatched path keeps walking until depth/cap is exhausted.
        if matches_until {
            continue;
        }
        walk_paths(store, &target_id, edge_type, direction, depth + 1, max_depth, min_depth, until_kind, visited, out);
    }
}
