//! `Match` / `MatchById` (§4.3.1).

use crate::row::Row;
use graphq_common::types::NodeId;
use graphq_core::GraphStore;

/// For every input row and every node with `label`, emits a new row binding
/// `alias` to that node.
pub(crate) fn apply_match(rows: Vec<Row>, label: &str, alias: &str, store: &GraphStore) -> Vec<Row> {
    let candidates = store.nodes_by_label(label);
    let mut out = Vec::with_capacity(rows.len() * candidates.len());
    for row in rows {
        for node in &candidates {
            let mut next = row.clone();
            next.bind_node(alias, node.clone());
            out.push(next);
        }
    }
    out
}

/// Resolves the single node with `id`; if absent, the result is empty
/// (rather than every input row passing through unbound).
pub(crate) fn apply_match_by_id(rows: Vec<Row>, id: &str, alias: &str, store: &GraphStore) -> Vec<Row> {
    let Some(node) = store.get_node(&NodeId::new(id)) else {
        return Vec::new();
    };
    rows.into_iter()
        .map(|mut row| {
            row.bind_node(alias, node.clone());
            row
        })
        .collect()
}
