//! The insertion-ordered adjacency index (§3.2 items 3-4).
//!
//! Grounded on the teacher's `ChunkedAdjacency` (`graphos-core/src/index/
//! adjacency.rs`): the same `RwLock`-guarded wrapper-struct API shape
//! (`add_edge`, `neighbors`, `out_degree`, `edges_of`, `clear`) survives,
//! but the chunked delta-buffer/tombstone/compaction machinery does not —
//! that exists in the teacher to amortize large out-of-core batches, which
//! is out of scope here (no disk persistence, no bulk-load path). Deletions
//! are simple `IndexSet::shift_remove` calls, and order is preserved by
//! `indexmap` directly rather than by a chunk-compaction pass.

use graphq_common::hash::FxHashMap;
use graphq_common::types::{EdgeId, NodeId};
use indexmap::IndexSet;
use parking_lot::RwLock;

/// Maps a node id to the set of edge ids incident to it in one direction,
/// preserving insertion order.
#[derive(Default)]
pub struct AdjacencyIndex {
    by_node: RwLock<FxHashMap<NodeId, IndexSet<EdgeId>>>,
}

impl AdjacencyIndex {
    /// Builds an empty adjacency index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `edge` is incident to `node` in this direction.
    pub fn add_edge(&self, node: NodeId, edge: EdgeId) {
        self.by_node.write().entry(node).or_default().insert(edge);
    }

    /// Removes the record of `edge` being incident to `node`.
    pub fn remove_edge(&self, node: &NodeId, edge: &EdgeId) {
        if let Some(set) = self.by_node.write().get_mut(node) {
            set.shift_remove(edge);
        }
    }

    /// Removes all adjacency records for `node` (used when a node is
    /// deleted).
    pub fn remove_node(&self, node: &NodeId) {
        self.by_node.write().remove(node);
    }

    /// Returns the edges incident to `node`, in insertion order.
    #[must_use]
    pub fn edges_of(&self, node: &NodeId) -> Vec<EdgeId> {
        self.by_node
            .read()
            .get(node)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the number of edges incident to `node`.
    #[must_use]
    pub fn degree(&self, node: &NodeId) -> usize {
        self.by_node.read().get(node).map_or(0, IndexSet::len)
    }

    /// Removes every recorded edge.
    pub fn clear(&self) {
        self.by_node.write().clear();
    }

    /// Snapshots the full index for transaction rollback (§5).
    #[must_use]
    pub(crate) fn snapshot(&self) -> FxHashMap<NodeId, IndexSet<EdgeId>> {
        self.by_node.read().clone()
    }

    /// Replaces the index wholesale, used when restoring a snapshot.
    pub(crate) fn restore(&self, snapshot: FxHashMap<NodeId, IndexSet<EdgeId>>) {
        *self.by_node.write() = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_of_preserves_insertion_order() {
        let adj = AdjacencyIndex::new();
        let n = NodeId::new("n1");
        adj.add_edge(n.clone(), EdgeId::new("e1"));
        adj.add_edge(n.clone(), EdgeId::new("e2"));
        adj.add_edge(n.clone(), EdgeId::new("e3"));

        assert_eq!(
            adj.edges_of(&n),
            vec![EdgeId::new("e1"), EdgeId::new("e2"), EdgeId::new("e3")]
        );
    }

    #[test]
    fn remove_edge_drops_just_that_edge() {
        let adj = AdjacencyIndex::new();
        let n = NodeId::new("n1");
        adj.add_edge(n.clone(), EdgeId::new("e1"));
        adj.add_edge(n.clone(), EdgeId::new("e2"));

        adj.remove_edge(&n, &EdgeId::new("e1"));

        assert_eq!(adj.edges_of(&n), vec![EdgeId::new("e2")]);
        assert_eq!(adj.degree(&n), 1);
    }
}
