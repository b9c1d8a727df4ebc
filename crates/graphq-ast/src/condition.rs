//! `Where` condition variants (§4.3.4).

use crate::common::EdgeDirection;
use graphq_common::types::Value;
use serde::{Deserialize, Serialize};

/// A scalar comparison operator, evaluated against a bound node/edge's `id`
/// or a property.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Strict equality.
    Eq,
    /// Strict inequality.
    Neq,
    /// Numeric greater-than.
    Gt,
    /// Numeric greater-than-or-equal.
    Gte,
    /// Numeric less-than.
    Lt,
    /// Numeric less-than-or-equal.
    Lte,
    /// Membership in a list value.
    In,
    /// Non-membership in a list value.
    NotIn,
    /// String contains substring.
    Contains,
    /// String starts with prefix.
    StartsWith,
    /// String ends with suffix.
    EndsWith,
    /// Property is absent or null.
    IsNull,
    /// Property is present and non-null.
    IsNotNull,
}

/// How a [`Condition::Logical`] combines its children.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum LogicalOp {
    /// All children must hold.
    And,
    /// At least one child must hold.
    Or,
    /// Negates the conjunction of its children (§4.3.4, §9 open question).
    Not,
}

/// A `Where` condition (§4.3.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Condition {
    /// Compares a bound alias's `id` or a property against a value.
    Comparison {
        /// The user (or internal) alias of the node/edge being inspected.
        target: String,
        /// `"id"` or a property name.
        field: String,
        /// The comparison operator.
        op: ComparisonOp,
        /// The comparison value. Absent for `IsNull`/`IsNotNull`.
        value: Option<Value>,
    },
    /// Combines child conditions with a boolean operator.
    Logical {
        /// The combinator.
        op: LogicalOp,
        /// The child conditions.
        children: Vec<Condition>,
    },
    /// True iff `target` has at least one matching edge.
    Exists {
        /// The alias being inspected.
        target: String,
        /// Restrict to this edge type, or any type if absent.
        edge_type: Option<String>,
        /// Which direction to look.
        direction: EdgeDirection,
        /// Flips the result when true.
        negated: bool,
    },
    /// True iff an edge of `edge_type` connects `target` to `node_id`.
    ConnectedTo {
        /// The alias being inspected.
        target: String,
        /// Restrict to this edge type, or any type if absent.
        edge_type: Option<String>,
        /// Which direction to look.
        direction: EdgeDirection,
        /// The peer node's id.
        node_id: String,
    },
}

impl Condition {
    /// Builds an `AND` of the given children.
    #[must_use]
    pub fn and(children: Vec<Condition>) -> Self {
        Condition::Logical { op: LogicalOp::And, children }
    }

    /// Builds an `OR` of the given children.
    #[must_use]
    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Logical { op: LogicalOp::Or, children }
    }

    /// Builds a `NOT` of the given children — negation of their conjunction
    /// (§9 open question, pinned by the spec).
    #[must_use]
    pub fn not(children: Vec<Condition>) -> Self {
        Condition::Logical { op: LogicalOp::Not, children }
    }
}
