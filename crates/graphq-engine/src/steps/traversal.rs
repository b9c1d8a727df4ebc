//! One-hop and variable-length `Traversal` (§4.3.2).

use crate::compare::apply_comparison;
use crate::fields::edge_field;
use crate::row::Row;
use crate::walk::{depth_first_walk, edges_with_targets};
use graphq_ast::{EdgeConditionSpec, TraversalSpec};
use graphq_common::config::EngineConfig;
use graphq_common::types::NodeId;
use graphq_core::{Edge, GraphStore};
use tracing::warn;

pub(crate) fn apply_traversal(
    rows: Vec<Row>,
    spec: &TraversalSpec,
    store: &GraphStore,
    config: &EngineConfig,
) -> Vec<Row> {
    let mut out = Vec::new();
    for row in rows {
        let Some(source) = row.node(&spec.from) else { continue };
        let source_id = source.id.clone();

        let produced = if let Some(var_length) = &spec.variable_length {
            variable_length_hops(&row, &source_id, spec, var_length, store, config)
        } else {
            one_hop(&row, &source_id, spec, store)
        };

        if produced.is_empty() {
            if spec.optional {
                let mut next = row.clone();
                next.bind_null_node(&spec.to);
                out.push(next);
            }
            continue;
        }
        out.extend(produced);
    }
    out
}

fn one_hop(row: &Row, source_id: &NodeId, spec: &TraversalSpec, store: &GraphStore) -> Vec<Row> {
    let mut out = Vec::new();
    for (edge, target_id) in edges_with_targets(store, source_id, &spec.edge_types, spec.direction) {
        if !edge_conditions_hold(&edge, &spec.edge_conditions) {
            continue;
        }
        let Some(target) = store.get_node(&target_id) else { continue };
        if !spec.to_labels.is_empty() && !spec.to_labels.contains(&target.label) {
            continue;
        }
        let mut next = row.clone();
        next.bind_node(&spec.to, target);
        if let Some(alias) = &spec.edge_alias {
            next.bind_edge(alias, edge);
        }
        out.push(next);
    }
    out
}

fn variable_length_hops(
    row: &Row,
    source_id: &NodeId,
    spec: &TraversalSpec,
    var_length: &graphq_ast::VariableLength,
    store: &GraphStore,
    config: &EngineConfig,
) -> Vec<Row> {
    let requested_max = var_length.max.unwrap_or(config.max_recursion_depth() as u32);
    let cap = config.max_recursion_depth() as u32;
    let effective_max = requested_max.min(cap);
    if requested_max > cap {
        warn!(cap, requested = requested_max, "variable-length traversal truncated at recursion cap");
    }

    let visits = depth_first_walk(
        store,
        source_id,
        &spec.edge_types,
        spec.direction,
        var_length.min.max(1),
        effective_max,
        var_length.uniqueness,
    );

    let mut out = Vec::new();
    for visit in visits {
        if let Some(edge) = &visit.edge {
            if !edge_conditions_hold(edge, &spec.edge_conditions) {
                continue;
            }
        }
        let Some(target) = store.get_node(&visit.node_id) else { continue };
        if !spec.to_labels.is_empty() && !spec.to_labels.contains(&target.label) {
            continue;
        }
        let mut next = row.clone();
        next.bind_node(&spec.to, target);
        if let (Some(alias), Some(edge)) = (&spec.edge_alias, visit.edge) {
            next.bind_edge(alias, edge);
        }
        out.push(next);
    }
    out
}

fn edge_conditions_hold(edge: &Edge, conditions: &[EdgeConditionSpec]) -> bool {
    conditions.iter().all(|cond| {
        let actual = edge_field(edge, &cond.field);
        apply_comparison(actual.as_ref(), cond.op, cond.value.as_ref())
    })
}
