//! `Fork` — multi-branch fan-out with Cartesian-product merge (§4.3.8).

use crate::row::Row;
use crate::steps::execute_steps;
use graphq_ast::{Branch, Condition, Step};
use graphq_common::config::EngineConfig;
use graphq_core::GraphStore;

/// For every input row, runs each branch independently from a clone of that
/// row, substitutes a single unchanged clone for any branch that produces
/// nothing (OPTIONAL-match semantics), then emits the Cartesian product of
/// the branches' row sets merged back onto the input row.
pub(crate) fn apply_fork(rows: Vec<Row>, source: &str, branches: &[Branch], store: &GraphStore, config: &EngineConfig) -> Vec<Row> {
    let mut out = Vec::new();
    for row in rows {
        if row.node(source).is_none() {
            out.push(row);
            continue;
        }

        let branch_row_sets: Vec<Vec<Row>> = branches
            .iter()
            .map(|branch| {
                let filtered = filter_branch_steps(&branch.steps, source);
                let produced = execute_steps(vec![row.clone()], &filtered, store, config);
                if produced.is_empty() { vec![row.clone()] } else { produced }
            })
            .collect();

        out.extend(cartesian_merge(&row, &branch_row_sets, source));
    }
    out
}

/// Applies the branch-step filtering rules of §4.3.8:
/// - the branch's own initial `Match`/`MatchById` is skipped (the source is
///   already bound by the fork itself);
/// - an `Alias` step that merely registers the source alias is skipped;
/// - a `Where` step whose conditions all target only the source alias is
///   skipped (it was already true when the fork started);
/// - `Hierarchy`/`OrderBy`/`Limit`/`Skip` steps are skipped entirely — they
///   apply to a whole row set, not to one fan-out branch;
/// - every `Traversal` is forced optional, regardless of how it was built.
fn filter_branch_steps(steps: &[Step], source_alias: &str) -> Vec<Step> {
    let mut out = Vec::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        match step {
            Step::Match { .. } | Step::MatchById { .. } if i == 0 => {}
            Step::Alias { internal, .. } if internal == source_alias => {}
            Step::Where { conditions } if conditions.iter().all(|c| targets_only(c, source_alias)) => {}
            Step::Hierarchy(_) | Step::OrderBy { .. } | Step::Limit(_) | Step::Skip(_) => {}
            Step::Traversal(spec) => {
                let mut spec = spec.clone();
                spec.optional = true;
                out.push(Step::Traversal(spec));
            }
            other => out.push(other.clone()),
        }
    }
    out
}

/// Whether every terminal condition in `condition` reads only `alias`.
fn targets_only(condition: &Condition, alias: &str) -> bool {
    match condition {
        Condition::Comparison { target, .. }
        | Condition::Exists { target, .. }
        | Condition::ConnectedTo { target, .. } => target == alias,
        Condition::Logical { children, .. } => children.iter().all(|c| targets_only(c, alias)),
    }
}

/// Builds the Cartesian product of `branch_row_sets`, merging each
/// combination onto a fresh clone of `base` (the pre-fork row) in branch
/// declaration order — the first branch varies slowest.
fn cartesian_merge(base: &Row, branch_row_sets: &[Vec<Row>], source_alias: &str) -> Vec<Row> {
    let mut combos = vec![base.clone()];
    for branch_rows in branch_row_sets {
        let mut next = Vec::with_capacity(combos.len() * branch_rows.len());
        for combo in &combos {
            for branch_row in branch_rows {
                let mut merged = combo.clone();
                merged.merge_branch_into(branch_row, source_alias);
                next.push(merged);
            }
        }
        combos = next;
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphq_ast::{EdgeDirection, TraversalSpec};

    fn traversal(from: &str, to: &str, optional: bool) -> Step {
        Step::Traversal(TraversalSpec {
            from: from.to_string(),
            to: to.to_string(),
            edge_alias: None,
            edge_types: vec![],
            direction: EdgeDirection::Out,
            to_labels: vec![],
            optional,
            edge_conditions: vec![],
            variable_length: None,
        })
    }

    #[test]
    fn initial_match_is_skipped_but_later_ones_are_not() {
        let steps = vec![Step::Match { label: "x".into(), alias: "n10".into() }, traversal("n10", "n11", false)];
        let filtered = filter_branch_steps(&steps, "n0");
        assert_eq!(filtered.len(), 1);
        assert!(matches!(&filtered[0], Step::Traversal(_)));
    }

    #[test]
    fn traversal_is_forced_optional() {
        let steps = vec![traversal("n0", "n10", false)];
        let filtered = filter_branch_steps(&steps, "n0");
        let Step::Traversal(spec) = &filtered[0] else { panic!("expected traversal") };
        assert!(spec.optional);
    }

    #[test]
    fn hierarchy_order_limit_skip_are_dropped() {
        let steps = vec![
            Step::OrderBy { fields: vec![] },
            Step::Limit(1),
            Step::Skip(1),
            traversal("n0", "n10", false),
        ];
        let filtered = filter_branch_steps(&steps, "n0");
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn where_targeting_only_source_is_dropped() {
        let steps = vec![
            Step::Where {
                conditions: vec![Condition::Comparison {
                    target: "n0".into(),
                    field: "id".into(),
                    op: graphq_ast::ComparisonOp::IsNotNull,
                    value: None,
                }],
            },
            traversal("n0", "n10", false),
        ];
        let filtered = filter_branch_steps(&steps, "n0");
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn cartesian_merge_produces_product_of_branch_sizes() {
        let base = Row::new();
        let a = vec![Row::new(), Row::new()];
        let b = vec![Row::new(), Row::new(), Row::new()];
        let merged = cartesian_merge(&base, &[a, b], "n0");
        assert_eq!(merged.len(), 6);
    }
}
