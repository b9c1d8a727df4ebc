//! Small shared enums referenced by steps and conditions.

use serde::{Deserialize, Serialize};

/// Which way an edge runs relative to its bound endpoint (§4.3.2).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum EdgeDirection {
    /// Follow edges where the bound node is the source.
    Out,
    /// Follow edges where the bound node is the target.
    In,
    /// Follow edges in either direction.
    Both,
}

/// Which way a hierarchy edge type points relative to the tree it encodes
/// (§4.3.3): `Up` means the edge points child → parent.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum HierarchyDirection {
    /// The edge points from child to parent.
    Up,
    /// The edge points from parent to child.
    Down,
}

/// The hierarchy operation requested by a [`crate::step::Step::Hierarchy`]
/// step (§4.3.3).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum HierarchyOp {
    /// The single parent of the source node, if any.
    Parent,
    /// All children of the source node.
    Children,
    /// Every ancestor of the source node.
    Ancestors,
    /// Every descendant of the source node.
    Descendants,
    /// Every sibling of the source node (nodes sharing its parent).
    Siblings,
    /// The root of the source node's tree.
    Root,
}

/// How a variable-length traversal or reachability walk deduplicates
/// visited entities (§4.3.2, §4.3.5).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Uniqueness {
    /// Never revisit a node id.
    Nodes,
    /// Never reuse an edge id.
    Edges,
    /// Permit revisits.
    None,
}

/// Ascending or descending sort order (§4.3.6).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}
