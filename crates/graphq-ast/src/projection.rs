//! [`Projection`] — what the engine turns the final row set into (§3.3,
//! §4.3.9).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The shape of a query's result records (§4.3.9).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ProjectionKind {
    /// One record: `{ userAlias: nodeProjection }`, using the AST's single
    /// configured node alias.
    Single,
    /// One record per row, same shape as `Single` but over every row.
    Collection,
    /// One record per row keyed by every requested user alias.
    MultiNode,
    /// A single `{ "count": N }` record.
    Count,
    /// A single boolean record: whether any rows were produced.
    Exists,
    /// One record per row, built directly from its computed-map entries.
    Aggregate,
}

/// A `collect` entry on a [`Projection`] (§4.3.8, §4.3.9): folds rows
/// sharing the same primary-alias node id into a list under `result_alias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectSpec {
    /// The key the collected list is stored under in the result record.
    pub result_alias: String,
    /// The user alias supplying values to collect.
    pub source_alias: String,
    /// Whether to deduplicate collected node ids.
    pub distinct: bool,
}

/// Describes how the engine should turn a finished row set into result
/// records (§4.3.9).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// The projection shape.
    pub kind: Option<ProjectionKind>,
    /// User-facing node aliases to include, in declaration order.
    pub node_aliases: Vec<String>,
    /// User-facing edge aliases to include, in declaration order.
    pub edge_aliases: Vec<String>,
    /// Per-alias field allow-list; an alias absent here (or mapped to an
    /// empty list) projects every property.
    pub field_selectors: HashMap<String, Vec<String>>,
    /// `collect` groupings for multi-node projections fed by a fork.
    pub collect: Vec<CollectSpec>,
    /// Whether to attach recorded depth to projected records.
    pub include_depth: bool,
    /// The computed-map key depth is read from, when `include_depth` is set.
    pub depth_key: Option<String>,
}

impl Projection {
    /// Builds an empty projection defaulting to [`ProjectionKind::Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
