//! `Reachable` — transitive-closure walk (§4.3.5).

use crate::row::Row;
use crate::walk::depth_first_walk;
use graphq_ast::ReachableSpec;
use graphq_common::config::EngineConfig;
use graphq_common::types::Value;
use graphq_core::GraphStore;
use tracing::warn;

pub(crate) fn apply_reachable(rows: Vec<Row>, spec: &ReachableSpec, store: &GraphStore, config: &EngineConfig) -> Vec<Row> {
    let mut out = Vec::new();
    for row in rows {
        let Some(source) = row.node(&spec.from) else { continue };
        let source_id = source.id.clone();

        if spec.include_self && spec.min_depth.unwrap_or(0) == 0 {
            let mut next = row.clone();
            next.bind_node(&spec.to, source.clone());
            if spec.include_depth {
                let key = spec.depth_alias.clone().unwrap_or_else(|| config.default_depth_alias().to_string());
                next.set_computed(key, Value::Int(0));
            }
            out.push(next);
        }

        let min_depth = spec.min_depth.unwrap_or(0).max(1);
        let requested_max = spec.max_depth.unwrap_or(config.max_recursion_depth() as u32);
        let cap = config.max_recursion_depth() as u32;
        let effective_max = requested_max.min(cap);
        if requested_max > cap {
            warn!(cap, requested = requested_max, "reachable walk truncated at recursion cap");
        }

        let visits = depth_first_walk(store, &source_id, &spec.edge_types, spec.direction, min_depth, effective_max, spec.uniqueness);
        for visit in visits {
            let Some(target) = store.get_node(&visit.node_id) else { continue };
            let mut next = row.clone();
            next.bind_node(&spec.to, target);
            if spec.include_depth {
                let key = spec.depth_alias.clone().unwrap_or_else(|| config.default_depth_alias().to_string());
                next.set_computed(key, Value::Int(i64::from(visit.depth)));
            }
            out.push(next);
        }
    }
    out
}
