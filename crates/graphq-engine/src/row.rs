//! [`Row`] — one execution context threaded through the engine's step
//! pipeline (§4.3).
//!
//! A row is a plain value: cloning it (as every fan-out and optional-match
//! path does) never lets one row's later mutation bleed into another.

use graphq_common::hash::{FxHashMap, FxHashSet};
use graphq_common::types::Value;
use graphq_core::{Edge, Node};

/// One row of engine execution state: alias-bound nodes and edges, plus a
/// scratch map of computed scalars (depth, aggregation results, …).
///
/// A node alias absent from `nodes` was never bound in this row — lookups
/// against it simply skip the row (§4.3.10). A node alias present in
/// `null_nodes` was bound to the *null sentinel* by an optional traversal
/// that matched nothing (§4.3.2, §10 "sentinel null target"); it behaves
/// like an absent binding for further traversal, but the projection layer
/// must still emit an explicit null for it.
#[derive(Debug, Clone, Default)]
pub struct Row {
    nodes: FxHashMap<String, Node>,
    edges: FxHashMap<String, Edge>,
    null_nodes: FxHashSet<String>,
    computed: FxHashMap<String, Value>,
}

impl Row {
    /// Builds an empty row — the single starting point of every execution
    /// (§4.3 step 1).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `alias` to `node`, clearing any null-sentinel mark.
    pub fn bind_node(&mut self, alias: impl Into<String>, node: Node) {
        let alias = alias.into();
        self.null_nodes.remove(&alias);
        self.nodes.insert(alias, node);
    }

    /// Marks `alias` as bound to the null sentinel (§4.3.2 step 7).
    pub fn bind_null_node(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        self.nodes.remove(&alias);
        self.null_nodes.insert(alias);
    }

    /// Binds `alias` to `edge`.
    pub fn bind_edge(&mut self, alias: impl Into<String>, edge: Edge) {
        self.edges.insert(alias.into(), edge);
    }

    /// Returns the node bound to `alias`, if any (absent for both
    /// never-bound and null-sentinel-bound aliases).
    #[must_use]
    pub fn node(&self, alias: &str) -> Option<&Node> {
        self.nodes.get(alias)
    }

    /// Returns the edge bound to `alias`, if any.
    #[must_use]
    pub fn edge(&self, alias: &str) -> Option<&Edge> {
        self.edges.get(alias)
    }

    /// Returns whether `alias` carries the null-sentinel mark.
    #[must_use]
    pub fn is_null_bound(&self, alias: &str) -> bool {
        self.null_nodes.contains(alias)
    }

    /// Returns whether `alias` has ever been touched by a bind (real or
    /// null-sentinel), as opposed to never mentioned by any step.
    #[must_use]
    pub fn has_binding(&self, alias: &str) -> bool {
        self.nodes.contains_key(alias) || self.null_nodes.contains(alias)
    }

    /// Stores a computed scalar (depth, aggregation output, …) under `key`.
    pub fn set_computed(&mut self, key: impl Into<String>, value: Value) {
        self.computed.insert(key.into(), value);
    }

    /// Returns a computed scalar, if set.
    #[must_use]
    pub fn computed(&self, key: &str) -> Option<&Value> {
        self.computed.get(key)
    }

    /// Returns the full computed-scalar map (used by aggregate projection,
    /// §4.3.9).
    #[must_use]
    pub fn computed_map(&self) -> &FxHashMap<String, Value> {
        &self.computed
    }

    /// Returns every bound node alias, arbitrary order.
    pub fn node_aliases(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// The sorted concatenation of bound node ids used by `Distinct`
    /// (§4.3.6) and by fork's collect-mode grouping (§4.3.9): null-bound
    /// and never-bound aliases contribute nothing, so two rows differing
    /// only in an optional alias's presence still compare equal here.
    #[must_use]
    pub fn distinct_key(&self) -> String {
        let mut ids: Vec<&str> = self.nodes.values().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.join("\u{1}")
    }

    /// Returns the id of the node bound to the first alias in
    /// `candidates` that is actually bound, used when grouping/collecting
    /// needs a "primary alias" (§4.3.7, §4.3.9).
    #[must_use]
    pub fn primary_node_id(&self, candidates: &[String]) -> Option<&str> {
        candidates.iter().find_map(|alias| self.node(alias)).map(|n| n.id.as_str())
    }

    /// Folds another row's bindings into this one, as fork's per-branch
    /// Cartesian merge does (§4.3.8 step 5): every node binding from
    /// `other` is copied in, real or null-sentinel, except `skip_alias` —
    /// the fork's source, which every branch already shares and which this
    /// merge must never overwrite. Edge bindings and computed scalars are
    /// unioned unconditionally.
    pub(crate) fn merge_branch_into(&mut self, other: &Row, skip_alias: &str) {
        for (alias, node) in &other.nodes {
            if alias != skip_alias {
                self.null_nodes.remove(alias);
                self.nodes.insert(alias.clone(), node.clone());
            }
        }
        for alias in &other.null_nodes {
            if alias != skip_alias && !self.nodes.contains_key(alias) {
                self.null_nodes.insert(alias.clone());
            }
        }
        for (alias, edge) in &other.edges {
            self.edges.insert(alias.clone(), edge.clone());
        }
        for (key, value) in &other.computed {
            self.computed.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphq_common::types::{NodeId, Timestamp};

    fn node(id: &str) -> Node {
        Node::new(NodeId::new(id), "person", Timestamp::from_millis(0))
    }

    #[test]
    fn null_bind_clears_real_binding_and_vice_versa() {
        let mut row = Row::new();
        row.bind_node("n0", node("a"));
        assert!(row.has_binding("n0"));
        assert!(!row.is_null_bound("n0"));

        row.bind_null_node("n0");
        assert!(row.node("n0").is_none());
        assert!(row.is_null_bound("n0"));
        assert!(row.has_binding("n0"));
    }

    #[test]
    fn distinct_key_ignores_unbound_aliases() {
        let mut a = Row::new();
        a.bind_node("n0", node("x"));
        let mut b = Row::new();
        b.bind_node("n0", node("x"));
        b.bind_null_node("n1");
        assert_eq!(a.distinct_key(), b.distinct_key());
    }
}
