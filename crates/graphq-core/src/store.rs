//! The graph store (§4.1): node/edge CRUD, derived indices, and the
//! single-level snapshot/rollback transaction model (§5).
//!
//! Grounded on the teacher's `LpgStore` (`graphos-core/src/graph/lpg/
//! store.rs`) for the overall `RwLock`-guarded wrapper shape and the
//! label-index/adjacency maintenance pattern, simplified per §3.1: nodes
//! carry exactly one string label rather than a 64-bit label bitset, and
//! ids are caller-supplied strings rather than store-generated `u64`s.
//! MVCC epoch versioning is dropped entirely — transactions here are
//! single-level eager-snapshot/rollback (§5), not the teacher's
//! `current_epoch` counter.

use crate::adjacency::AdjacencyIndex;
use crate::edge::Edge;
use crate::export::ExportedGraph;
use crate::node::Node;
use graphq_common::error::{Error, Result, TransactionError};
use graphq_common::hash::{FxHashMap, FxHashSet};
use graphq_common::types::{EdgeId, NodeId, PropertyKey, Timestamp, Value};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Which way an edge runs relative to a node.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    /// Edges where the node is `from_id`.
    Out,
    /// Edges where the node is `to_id`.
    In,
    /// Both outgoing and incoming edges.
    Both,
}

/// A point-in-time summary of the store's size (§4.1 "self-describing").
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StoreStats {
    /// Number of stored nodes.
    pub node_count: usize,
    /// Number of stored edges.
    pub edge_count: usize,
    /// Number of distinct labels in use.
    pub label_count: usize,
    /// Number of distinct edge types in use.
    pub edge_type_count: usize,
    /// Number of explicitly created `(label, property)` indices.
    pub indexed_property_count: usize,
}

fn now() -> Timestamp {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0);
    Timestamp::from_millis(millis)
}

struct Snapshot {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    label_index: FxHashMap<String, IndexSet<NodeId>>,
    edge_type_index: FxHashMap<String, IndexSet<EdgeId>>,
    outgoing: FxHashMap<NodeId, IndexSet<EdgeId>>,
    incoming: FxHashMap<NodeId, IndexSet<EdgeId>>,
    indexed_properties: FxHashSet<(String, PropertyKey)>,
}

/// The graph store.
///
/// Every read returns a defensive copy (§4.1 isolation contract): callers
/// cannot mutate store state through a returned [`Node`]/[`Edge`]/[`Vec`].
pub struct GraphStore {
    nodes: RwLock<IndexMap<NodeId, Node>>,
    edges: RwLock<IndexMap<EdgeId, Edge>>,
    label_index: RwLock<FxHashMap<String, IndexSet<NodeId>>>,
    edge_type_index: RwLock<FxHashMap<String, IndexSet<EdgeId>>>,
    outgoing: AdjacencyIndex,
    incoming: AdjacencyIndex,
    property_indices: RwLock<FxHashMap<(String, PropertyKey), FxHashMap<String, IndexSet<NodeId>>>>,
    tx: RwLock<Option<Snapshot>>,
}

impl GraphStore {
    /// Builds an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(IndexMap::new()),
            edges: RwLock::new(IndexMap::new()),
            label_index: RwLock::new(FxHashMap::default()),
            edge_type_index: RwLock::new(FxHashMap::default()),
            outgoing: AdjacencyIndex::new(),
            incoming: AdjacencyIndex::new(),
            property_indices: RwLock::new(FxHashMap::default()),
            tx: RwLock::new(None),
        }
    }

    // === Node operations ===

    /// Creates a new node.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateId`] if `id` already exists.
    pub fn create_node(
        &self,
        id: NodeId,
        label: impl Into<String>,
        properties: impl IntoIterator<Item = (PropertyKey, Value)>,
    ) -> Result<Node> {
        let label = label.into();
        let mut nodes = self.nodes.write();
        if nodes.contains_key(&id) {
            return Err(Error::DuplicateId {
                kind: "node",
                id: id.to_string(),
            });
        }

        let mut node = Node::new(id.clone(), label.clone(), now());
        for (k, v) in properties {
            node.properties.insert(k, v);
        }

        self.label_index
            .write()
            .entry(label.clone())
            .or_default()
            .insert(id.clone());
        self.index_node_properties(&node);

        nodes.insert(id.clone(), node.clone());
        trace!(node_id = %id, label = %label, "created node");
        Ok(node)
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn get_node(&self, id: &NodeId) -> Option<Node> {
        self.nodes.read().get(id).cloned()
    }

    /// Merges `patch` into a node's properties, bumping `updated_at`.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `id` does not exist.
    pub fn update_node(
        &self,
        id: &NodeId,
        patch: impl IntoIterator<Item = (PropertyKey, Value)>,
    ) -> Result<Node> {
        let mut nodes = self.nodes.write();
        let node = nodes.get_mut(id).ok_or_else(|| Error::NotFound {
            kind: "node",
            id: id.to_string(),
        })?;

        for (k, v) in patch {
            node.properties.insert(k, v);
        }
        node.updated_at = now();
        let updated = node.clone();
        drop(nodes);

        self.reindex_node_properties(&updated);
        trace!(node_id = %id, "updated node");
        Ok(updated)
    }

    /// Deletes a node and every edge where it is an endpoint (§3.1 cascade).
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `id` does not exist.
    pub fn delete_node(&self, id: &NodeId) -> Result<()> {
        let removed = {
            let mut nodes = self.nodes.write();
            nodes.shift_remove(id).ok_or_else(|| Error::NotFound {
                kind: "node",
                id: id.to_string(),
            })?
        };

        if let Some(set) = self.label_index.write().get_mut(&removed.label) {
            set.shift_remove(id);
        }
        self.unindex_node_properties(&removed);

        let incident: Vec<EdgeId> = self
            .outgoing
            .edges_of(id)
            .into_iter()
            .chain(self.incoming.edges_of(id))
            .collect();
        for edge_id in incident {
            let _ = self.delete_edge(&edge_id);
        }
        self.outgoing.remove_node(id);
        self.incoming.remove_node(id);

        debug!(node_id = %id, "deleted node (cascaded)");
        Ok(())
    }

    /// Returns every node with the given label, in insertion order.
    #[must_use]
    pub fn nodes_by_label(&self, label: &str) -> Vec<Node> {
        let nodes = self.nodes.read();
        self.label_index
            .read()
            .get(label)
            .map(|ids| ids.iter().filter_map(|id| nodes.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    // === Edge operations ===

    /// Creates a new edge.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateId`] if `id` already exists, or
    /// [`Error::EndpointMissing`] if either endpoint does not exist.
    pub fn create_edge(
        &self,
        id: EdgeId,
        edge_type: impl Into<String>,
        from_id: NodeId,
        to_id: NodeId,
        properties: impl IntoIterator<Item = (PropertyKey, Value)>,
    ) -> Result<Edge> {
        let edge_type = edge_type.into();
        {
            let nodes = self.nodes.read();
            if !nodes.contains_key(&from_id) {
                return Err(Error::EndpointMissing {
                    edge_id: id.to_string(),
                    node_id: from_id.to_string(),
                });
            }
            if !nodes.contains_key(&to_id) {
                return Err(Error::EndpointMissing {
                    edge_id: id.to_string(),
                    node_id: to_id.to_string(),
                });
            }
        }

        let mut edges = self.edges.write();
        if edges.contains_key(&id) {
            return Err(Error::DuplicateId {
                kind: "edge",
                id: id.to_string(),
            });
        }

        let mut edge = Edge::new(id.clone(), edge_type.clone(), from_id.clone(), to_id.clone(), now());
        for (k, v) in properties {
            edge.properties.insert(k, v);
        }

        self.edge_type_index
            .write()
            .entry(edge_type.clone())
            .or_default()
            .insert(id.clone());
        self.outgoing.add_edge(from_id, id.clone());
        self.incoming.add_edge(to_id, id.clone());

        edges.insert(id.clone(), edge.clone());
        trace!(edge_id = %id, edge_type = %edge_type, "created edge");
        Ok(edge)
    }

    /// Looks up an edge by id.
    #[must_use]
    pub fn get_edge(&self, id: &EdgeId) -> Option<Edge> {
        self.edges.read().get(id).cloned()
    }

    /// Merges `patch` into an edge's properties.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `id` does not exist.
    pub fn update_edge(
        &self,
        id: &EdgeId,
        patch: impl IntoIterator<Item = (PropertyKey, Value)>,
    ) -> Result<Edge> {
        let mut edges = self.edges.write();
        let edge = edges.get_mut(id).ok_or_else(|| Error::NotFound {
            kind: "edge",
            id: id.to_string(),
        })?;
        for (k, v) in patch {
            edge.properties.insert(k, v);
        }
        Ok(edge.clone())
    }

    /// Deletes an edge. Does not cascade.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if `id` does not exist.
    pub fn delete_edge(&self, id: &EdgeId) -> Result<()> {
        let removed = {
            let mut edges = self.edges.write();
            edges.shift_remove(id).ok_or_else(|| Error::NotFound {
                kind: "edge",
                id: id.to_string(),
            })?
        };

        if let Some(set) = self.edge_type_index.write().get_mut(&removed.edge_type) {
            set.shift_remove(id);
        }
        self.outgoing.remove_edge(&removed.from_id, id);
        self.incoming.remove_edge(&removed.to_id, id);

        trace!(edge_id = %id, "deleted edge");
        Ok(())
    }

    /// Returns outgoing edges of `node`, optionally filtered by type, in
    /// insertion order.
    #[must_use]
    pub fn outgoing(&self, node: &NodeId, edge_type: Option<&str>) -> Vec<Edge> {
        self.edges_for(&self.outgoing, node, edge_type)
    }

    /// Returns incoming edges of `node`, optionally filtered by type, in
    /// insertion order.
    #[must_use]
    pub fn incoming(&self, node: &NodeId, edge_type: Option<&str>) -> Vec<Edge> {
        self.edges_for(&self.incoming, node, edge_type)
    }

    fn edges_for(&self, index: &AdjacencyIndex, node: &NodeId, edge_type: Option<&str>) -> Vec<Edge> {
        let edges = self.edges.read();
        index
            .edges_of(node)
            .into_iter()
            .filter_map(|id| edges.get(&id).cloned())
            .filter(|e| edge_type.is_none_or(|t| e.edge_type == t))
            .collect()
    }

    /// Finds the first edge of the given type from `from` to `to`, if any.
    #[must_use]
    pub fn find_edge(&self, from: &NodeId, to: &NodeId, edge_type: Option<&str>) -> Option<Edge> {
        self.outgoing(from, edge_type).into_iter().find(|e| &e.to_id == to)
    }

    /// Returns whether any edge of the given type connects `from` to `to`.
    #[must_use]
    pub fn has_edge(&self, from: &NodeId, to: &NodeId, edge_type: Option<&str>) -> bool {
        self.find_edge(from, to, edge_type).is_some()
    }

    // === Secondary indices ===

    /// Creates (or refreshes) a property index for `(label, property)`,
    /// populating it from the nodes currently in the store. Idempotent.
    pub fn create_index(&self, label: &str, property: &PropertyKey) {
        let key = (label.to_string(), property.clone());
        let mut built = FxHashMap::default();
        for node in self.nodes_by_label(label) {
            if let Some(value) = node.get(property.as_str()) {
                built
                    .entry(value.ordinal_string())
                    .or_insert_with(IndexSet::new)
                    .insert(node.id.clone());
            }
        }
        self.property_indices.write().insert(key, built);
    }

    /// Finds nodes of `label` whose `property` equals `value`.
    ///
    /// Falls back to a full label scan when no such index exists — callers
    /// never observe a behavioral difference, only a performance one
    /// (§4.1).
    #[must_use]
    pub fn find_by_index(&self, label: &str, property: &PropertyKey, value: &Value) -> Vec<Node> {
        let key = (label.to_string(), property.clone());
        if let Some(index) = self.property_indices.read().get(&key) {
            let nodes = self.nodes.read();
            return index
                .get(value.ordinal_string().as_str())
                .map(|ids| ids.iter().filter_map(|id| nodes.get(id).cloned()).collect())
                .unwrap_or_default();
        }

        self.nodes_by_label(label)
            .into_iter()
            .filter(|n| n.get(property.as_str()) == Some(value))
            .collect()
    }

    fn index_node_properties(&self, node: &Node) {
        let mut indices = self.property_indices.write();
        for ((label, prop), index) in indices.iter_mut() {
            if *label != node.label {
                continue;
            }
            if let Some(value) = node.get(prop.as_str()) {
                index
                    .entry(value.ordinal_string())
                    .or_insert_with(IndexSet::new)
                    .insert(node.id.clone());
            }
        }
    }

    fn unindex_node_properties(&self, node: &Node) {
        let mut indices = self.property_indices.write();
        for ((label, _), index) in indices.iter_mut() {
            if *label != node.label {
                continue;
            }
            for bucket in index.values_mut() {
                bucket.shift_remove(&node.id);
            }
        }
    }

    fn reindex_node_properties(&self, node: &Node) {
        self.unindex_node_properties(node);
        self.index_node_properties(node);
    }

    // === Transactions (§5) ===

    /// Begins a transaction, eagerly snapshotting node/edge/adjacency state.
    ///
    /// # Errors
    /// Returns [`Error::TransactionState`] if a transaction is already
    /// active (no nesting, §5).
    pub fn begin(&self) -> Result<()> {
        let mut tx = self.tx.write();
        if tx.is_some() {
            return Err(Error::TransactionState(TransactionError::AlreadyActive));
        }
        *tx = Some(Snapshot {
            nodes: self.nodes.read().clone(),
            edges: self.edges.read().clone(),
            label_index: self.label_index.read().clone(),
            edge_type_index: self.edge_type_index.read().clone(),
            outgoing: self.outgoing.snapshot(),
            incoming: self.incoming.snapshot(),
            indexed_properties: self.property_indices.read().keys().cloned().collect(),
        });
        debug!("transaction begun");
        Ok(())
    }

    /// Commits the active transaction, discarding its snapshot.
    ///
    /// # Errors
    /// Returns [`Error::TransactionState`] if no transaction is active.
    pub fn commit(&self) -> Result<()> {
        let mut tx = self.tx.write();
        if tx.take().is_none() {
            return Err(Error::TransactionState(TransactionError::NoActiveTransaction));
        }
        debug!("transaction committed");
        Ok(())
    }

    /// Rolls back the active transaction: restores node/edge/adjacency
    /// state from the snapshot and rebuilds every derived index from
    /// scratch (§5 — rebuild, not diff).
    ///
    /// # Errors
    /// Returns [`Error::TransactionState`] if no transaction is active.
    pub fn rollback(&self) -> Result<()> {
        let snapshot = self
            .tx
            .write()
            .take()
            .ok_or(Error::TransactionState(TransactionError::NoActiveTransaction))?;

        *self.nodes.write() = snapshot.nodes;
        *self.edges.write() = snapshot.edges;
        self.outgoing.restore(snapshot.outgoing);
        self.incoming.restore(snapshot.incoming);
        *self.label_index.write() = snapshot.label_index;
        *self.edge_type_index.write() = snapshot.edge_type_index;

        self.property_indices.write().clear();
        for (label, prop) in snapshot.indexed_properties {
            self.create_index(&label, &prop);
        }

        debug!("transaction rolled back, indices rebuilt");
        Ok(())
    }

    // === Whole-store operations ===

    /// Removes every node, edge and index entry.
    pub fn clear(&self) {
        self.nodes.write().clear();
        self.edges.write().clear();
        self.label_index.write().clear();
        self.edge_type_index.write().clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.property_indices.write().clear();
    }

    /// Returns a point-in-time summary of the store's size.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            node_count: self.nodes.read().len(),
            edge_count: self.edges.read().len(),
            label_count: self.label_index.read().len(),
            edge_type_count: self.edge_type_index.read().len(),
            indexed_property_count: self.property_indices.read().len(),
        }
    }

    /// Exports every node and edge to a passive, serializable form (§6.3).
    #[must_use]
    pub fn export(&self) -> ExportedGraph {
        ExportedGraph {
            nodes: self.nodes.read().values().cloned().collect(),
            edges: self.edges.read().values().cloned().collect(),
        }
    }

    /// Replaces the store's contents with `graph`, rebuilding every index
    /// from scratch. Existing property indices (by `(label, property)`) are
    /// recreated against the imported data.
    pub fn import(&self, graph: ExportedGraph) {
        let existing_indices: Vec<(String, PropertyKey)> =
            self.property_indices.read().keys().cloned().collect();

        self.clear();

        {
            let mut nodes = self.nodes.write();
            let mut label_index = self.label_index.write();
            for node in graph.nodes {
                label_index.entry(node.label.clone()).or_default().insert(node.id.clone());
                nodes.insert(node.id.clone(), node);
            }
        }

        {
            let mut edges = self.edges.write();
            let mut edge_type_index = self.edge_type_index.write();
            for edge in graph.edges {
                edge_type_index.entry(edge.edge_type.clone()).or_default().insert(edge.id.clone());
                self.outgoing.add_edge(edge.from_id.clone(), edge.id.clone());
                self.incoming.add_edge(edge.to_id.clone(), edge.id.clone());
                edges.insert(edge.id.clone(), edge);
            }
        }

        for (label, prop) in existing_indices {
            self.create_index(&label, &prop);
        }

        debug!("imported graph, indices rebuilt");
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_two_people() -> (GraphStore, NodeId, NodeId) {
        let store = GraphStore::new();
        let a = store
            .create_node(NodeId::new("a"), "person", [(PropertyKey::new("name"), Value::from("Alice"))])
            .unwrap();
        let b = store
            .create_node(NodeId::new("b"), "person", [(PropertyKey::new("name"), Value::from("Bob"))])
            .unwrap();
        (store, a.id, b.id)
    }

    #[test]
    fn create_node_rejects_duplicate_id() {
        let store = GraphStore::new();
        store.create_node(NodeId::new("a"), "person", []).unwrap();
        let err = store.create_node(NodeId::new("a"), "person", []).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }

    #[test]
    fn create_edge_rejects_missing_endpoint() {
        let store = GraphStore::new();
        store.create_node(NodeId::new("a"), "person", []).unwrap();
        let err = store
            .create_edge(EdgeId::new("e1"), "knows", NodeId::new("a"), NodeId::new("ghost"), [])
            .unwrap_err();
        assert!(matches!(err, Error::EndpointMissing { .. }));
    }

    #[test]
    fn delete_node_cascades_to_incident_edges() {
        let (store, a, b) = store_with_two_people();
        let edge = store.create_edge(EdgeId::new("e1"), "knows", a.clone(), b.clone(), []).unwrap();

        store.delete_node(&a).unwrap();

        assert!(store.get_edge(&edge.id).is_none());
        assert!(store.incoming(&b, None).is_empty());
    }

    #[test]
    fn nodes_by_label_preserves_insertion_order() {
        let (store, a, b) = store_with_two_people();
        let ids: Vec<NodeId> = store.nodes_by_label("person").into_iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn find_by_index_matches_full_scan_fallback() {
        let (store, a, _b) = store_with_two_people();
        let by_scan = store.find_by_index("person", &PropertyKey::new("name"), &Value::from("Alice"));
        assert_eq!(by_scan.len(), 1);
        assert_eq!(by_scan[0].id, a);

        store.create_index("person", &PropertyKey::new("name"));
        let by_index = store.find_by_index("person", &PropertyKey::new("name"), &Value::from("Alice"));
        assert_eq!(by_index.len(), 1);
        assert_eq!(by_index[0].id, a);
    }

    #[test]
    fn rollback_restores_pre_transaction_state() {
        let store = GraphStore::new();
        store.create_node(NodeId::new("a"), "person", []).unwrap();

        store.begin().unwrap();
        store.create_node(NodeId::new("b"), "person", []).unwrap();
        store.create_node(NodeId::new("c"), "person", []).unwrap();
        store.rollback().unwrap();

        let stats = store.stats();
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.edge_count, 0);
        assert_eq!(store.nodes_by_label("person").len(), 1);
    }

    #[test]
    fn commit_applies_mutations_durably() {
        let store = GraphStore::new();
        store.begin().unwrap();
        store.create_node(NodeId::new("a"), "person", []).unwrap();
        store.commit().unwrap();

        assert_eq!(store.stats().node_count, 1);
        assert!(store.begin().is_ok());
    }

    #[test]
    fn nested_begin_is_rejected() {
        let store = GraphStore::new();
        store.begin().unwrap();
        let err = store.begin().unwrap_err();
        assert!(matches!(
            err,
            Error::TransactionState(TransactionError::AlreadyActive)
        ));
    }

    #[test]
    fn export_import_round_trips() {
        let (store, a, b) = store_with_two_people();
        store.create_edge(EdgeId::new("e1"), "knows", a.clone(), b.clone(), []).unwrap();

        let exported = store.export();

        let restored = GraphStore::new();
        restored.import(exported);

        assert_eq!(restored.stats().node_count, 2);
        assert_eq!(restored.stats().edge_count, 1);
        assert!(restored.has_edge(&a, &b, Some("knows")));
    }
}
