//! Dispatches a single [`Step`] against a row set and folds a whole step
//! sequence over one (§4.3 execution outline, step 2).

mod aggregate;
mod fork;
mod hierarchy;
mod match_step;
mod order;
mod reachable;
mod traversal;
mod where_;

use crate::row::Row;
use graphq_ast::Step;
use graphq_common::config::EngineConfig;
use graphq_core::GraphStore;
use tracing::{info_span, trace};

/// Executes an ordered sequence of steps against a row set, stopping early
/// once the row set goes empty — later steps can never reintroduce rows
/// (§4.3 step 2).
pub(crate) fn execute_steps(mut rows: Vec<Row>, steps: &[Step], store: &GraphStore, config: &EngineConfig) -> Vec<Row> {
    for step in steps {
        if rows.is_empty() {
            break;
        }
        let name = step_name(step);
        let span = info_span!("step", name);
        let _guard = span.enter();
        let input_len = rows.len();
        rows = execute_step(rows, step, store, config);
        if config.query_logging() {
            trace!(step = name, input = input_len, output = rows.len(), "step executed");
        }
    }
    rows
}

/// Executes one step, dispatching by its tag (§4.3.1-§4.3.8).
fn execute_step(rows: Vec<Row>, step: &Step, store: &GraphStore, config: &EngineConfig) -> Vec<Row> {
    match step {
        Step::Match { label, alias } => match_step::apply_match(rows, label, alias, store),
        Step::MatchById { id, alias } => match_step::apply_match_by_id(rows, id, alias, store),
        Step::Traversal(spec) => traversal::apply_traversal(rows, spec, store, config),
        Step::Where { conditions } => where_::apply_where(rows, conditions, store),
        Step::Hierarchy(spec) => hierarchy::apply_hierarchy(rows, spec, store, config),
        Step::Reachable(spec) => reachable::apply_reachable(rows, spec, store, config),
        Step::OrderBy { fields } => order::apply_order_by(rows, fields),
        Step::Limit(n) => order::apply_limit(rows, *n),
        Step::Skip(n) => order::apply_skip(rows, *n),
        Step::Distinct => order::apply_distinct(rows),
        Step::Aggregate { group_by, aggregations } => aggregate::apply_aggregate(rows, group_by, aggregations),
        // Metadata only: the user-alias mapping already lives in the AST's
        // alias tables, so a row never needs to record it (§3.3).
        Step::Alias { .. } => rows,
        Step::Fork { source, branches } => fork::apply_fork(rows, source, branches, store, config),
    }
}

fn step_name(step: &Step) -> &'static str {
    match step {
        Step::Match { .. } => "match",
        Step::MatchById { .. } => "match_by_id",
        Step::Traversal(_) => "traversal",
        Step::Where { .. } => "where",
        Step::Hierarchy(_) => "hierarchy",
        Step::Reachable(_) => "reachable",
        Step::OrderBy { .. } => "order_by",
        Step::Limit(_) => "limit",
        Step::Skip(_) => "skip",
        Step::Distinct => "distinct",
        Step::Aggregate { .. } => "aggregate",
        Step::Alias { .. } => "alias",
        Step::Fork { .. } => "fork",
    }
}
