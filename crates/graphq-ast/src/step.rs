//! [`Step`] — the tagged variants executed in order by the query engine
//! (§3.3, §4.3).

use crate::alias::AliasTable;
use crate::common::{EdgeDirection, HierarchyDirection, HierarchyOp, SortDirection, Uniqueness};
use crate::condition::{Condition, ComparisonOp};
use graphq_common::types::Value;
use serde::{Deserialize, Serialize};

/// A variable-length traversal configuration (§3.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableLength {
    /// Minimum hop count (inclusive) for a row to be emitted.
    pub min: u32,
    /// Maximum hop count (inclusive); falls back to the engine's recursion
    /// cap when absent.
    pub max: Option<u32>,
    /// Deduplication mode during the walk.
    pub uniqueness: Uniqueness,
}

/// A single condition applied to a traversed edge's properties, evaluated
/// before the edge is retained (§4.3.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConditionSpec {
    /// `"id"`, `"type"`, or a property name on the traversed edge.
    pub field: String,
    /// The comparison operator.
    pub op: ComparisonOp,
    /// The comparison value. Absent for `IsNull`/`IsNotNull`.
    pub value: Option<Value>,
}

/// The full configuration of a [`Step::Traversal`] (§4.3.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalSpec {
    /// Internal alias of the already-bound source node.
    pub from: String,
    /// Internal alias to bind the target node to.
    pub to: String,
    /// Internal alias to bind the traversed edge to, if captured.
    pub edge_alias: Option<String>,
    /// Restrict to these edge types; empty means any type.
    pub edge_types: Vec<String>,
    /// Which direction(s) to follow.
    pub direction: EdgeDirection,
    /// Restrict targets to these labels; empty means any label.
    pub to_labels: Vec<String>,
    /// If true, emit one null-bound row per source row with no matches
    /// instead of dropping it (§4.3.2).
    pub optional: bool,
    /// Conditions every retained edge must satisfy.
    pub edge_conditions: Vec<EdgeConditionSpec>,
    /// If present, performs a variable-length walk instead of one hop.
    pub variable_length: Option<VariableLength>,
}

/// The full configuration of a [`Step::Hierarchy`] (§4.3.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchySpec {
    /// Which hierarchy relationship to compute.
    pub operation: HierarchyOp,
    /// The edge type encoding the hierarchy.
    pub edge_type: String,
    /// Which way that edge type points relative to the tree.
    pub direction: HierarchyDirection,
    /// Internal alias of the already-bound source node.
    pub from: String,
    /// Internal alias to bind the result node to.
    pub to: String,
    /// Minimum depth (inclusive) for ancestors/descendants.
    pub min_depth: Option<u32>,
    /// Maximum depth (inclusive) for ancestors/descendants/root.
    pub max_depth: Option<u32>,
    /// Whether to also emit the source node itself at depth 0.
    pub include_self: bool,
    /// Whether to record depth in the row's computed map.
    pub include_depth: bool,
    /// The computed-map key to store depth under; defaults to the engine
    /// config's `default_depth_alias` when absent.
    pub depth_alias: Option<String>,
    /// Stop an ancestors/descendants walk at the first node with this
    /// label along each path (§4.3.3).
    pub until_kind: Option<String>,
}

/// The full configuration of a [`Step::Reachable`] (§4.3.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReachableSpec {
    /// Restrict to these edge types; empty means any type.
    pub edge_types: Vec<String>,
    /// Which direction(s) to follow.
    pub direction: EdgeDirection,
    /// Internal alias of the already-bound source node.
    pub from: String,
    /// Internal alias to bind each reachable node to.
    pub to: String,
    /// Minimum depth (inclusive).
    pub min_depth: Option<u32>,
    /// Maximum depth (inclusive); falls back to the engine's recursion cap.
    pub max_depth: Option<u32>,
    /// Deduplication mode during the walk.
    pub uniqueness: Uniqueness,
    /// Whether to also emit the source node itself at depth 0.
    pub include_self: bool,
    /// Whether to record depth in the row's computed map.
    pub include_depth: bool,
    /// The computed-map key to store depth under.
    pub depth_alias: Option<String>,
}

/// One `OrderBy` sort key (§4.3.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderField {
    /// The aliased node/edge the field is read from.
    pub target: String,
    /// `"id"` or a property name.
    pub field: String,
    /// Ascending or descending.
    pub direction: SortDirection,
}

/// One `groupBy` key for an `Aggregate` step (§4.3.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupByField {
    /// The aliased node/edge the key is read from.
    pub alias: String,
    /// `"id"` or a property name. Falls back to the bound node's id when
    /// absent.
    pub field: Option<String>,
}

/// A reduction function available to an `Aggregate` step (§4.3.7).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum AggregateFunction {
    /// Number of rows (or distinct values) in the group.
    Count,
    /// Sum of a numeric field.
    Sum,
    /// Average of a numeric field.
    Avg,
    /// Minimum of a numeric field.
    Min,
    /// Maximum of a numeric field.
    Max,
    /// Collects values (or node projections) into a list.
    Collect,
}

/// One computed aggregation within an `Aggregate` step (§4.3.7).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSpec {
    /// The reduction function.
    pub function: AggregateFunction,
    /// Whether to deduplicate inputs before reducing.
    pub distinct: bool,
    /// The alias the input is read from.
    pub source: Option<String>,
    /// `"id"` or a property name read from `source`.
    pub field: Option<String>,
    /// The computed-map key the result is stored under.
    pub result_alias: String,
}

/// A fan-out branch within a [`Step::Fork`] (§4.3.8).
///
/// Carries its own alias tables, snapshotted once the branch is finished
/// being built, since a branch's internal aliases live in a counter range
/// offset from the parent (§4.2, §9 invariant 10).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// The steps to run against a clone of the input row.
    pub steps: Vec<Step>,
    /// The branch's own node alias table.
    pub node_aliases: AliasTable,
    /// The branch's own edge alias table.
    pub edge_aliases: AliasTable,
}

/// A single step in a [`crate::builder::QueryAst`]'s pipeline (§3.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Binds every node with `label` to `alias` (§4.3.1).
    Match {
        /// The label to scan.
        label: String,
        /// The internal alias to bind matches to.
        alias: String,
    },
    /// Binds the single node with `id` to `alias`, or produces no rows if
    /// absent (§4.3.1).
    MatchById {
        /// The node id to look up.
        id: String,
        /// The internal alias to bind the match to.
        alias: String,
    },
    /// One-hop or variable-length traversal (§4.3.2).
    Traversal(TraversalSpec),
    /// Retains rows satisfying every top-level condition (§4.3.4).
    Where {
        /// The conditions, implicitly AND-ed.
        conditions: Vec<Condition>,
    },
    /// A specialized single-edge-type tree traversal (§4.3.3).
    Hierarchy(HierarchySpec),
    /// Transitive-closure walk (§4.3.5).
    Reachable(ReachableSpec),
    /// Stable multi-key sort (§4.3.6).
    OrderBy {
        /// The sort keys, most significant first.
        fields: Vec<OrderField>,
    },
    /// Keeps only the first `n` rows.
    Limit(u64),
    /// Drops the first `n` rows.
    Skip(u64),
    /// Deduplicates rows by sorted concatenation of bound node ids
    /// (§4.3.6).
    Distinct,
    /// Grouped or whole-set aggregation (§4.3.7).
    Aggregate {
        /// Grouping keys; empty means one group over the whole row set.
        group_by: Vec<GroupByField>,
        /// The computed aggregations.
        aggregations: Vec<AggregateSpec>,
    },
    /// Registers a user-facing alias for an already-allocated internal
    /// alias. Metadata only — never alters rows.
    Alias {
        /// The internal alias being named.
        internal: String,
        /// The user-facing name.
        user: String,
    },
    /// Multi-branch fan-out with Cartesian-product merge (§4.3.8).
    Fork {
        /// Internal alias of the row's fan-out source node.
        source: String,
        /// The independent branches to merge.
        branches: Vec<Branch>,
    },
}
