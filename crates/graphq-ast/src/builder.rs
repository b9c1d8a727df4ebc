//! The builder API: [`QueryAst`] for the top-level pipeline and
//! [`ForkBranchBuilder`] for fork branches (§4.2).
//!
//! Each builder method takes `self` by value and returns a new value, so a
//! caller chains calls the same way the teacher chains `Config::in_memory()
//! .with_threads(4)`; nothing about a previously-returned `QueryAst` is
//! mutated out from under the caller once control returns to them.

use crate::alias::AliasTable;
use crate::condition::Condition;
use crate::projection::{Projection, ProjectionKind};
use crate::step::{
    AggregateSpec, Branch, GroupByField, HierarchySpec, OrderField, ReachableSpec, Step,
    TraversalSpec,
};
use graphq_common::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Either a node or an edge alias was most recently allocated; `.as_alias()`
/// attaches a user-facing name to whichever one it was (§4.2).
#[derive(Debug, Clone, PartialEq)]
enum CurrentRef {
    Node(String),
    Edge(String),
}

/// The shared step-building machinery behind both [`QueryAst`] and
/// [`ForkBranchBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Cursor {
    steps: Vec<Step>,
    node_aliases: AliasTable,
    edge_aliases: AliasTable,
    /// Builder-local scratch state; not part of the passive `SerializedAST`
    /// form (§6.3).
    #[serde(skip)]
    current: Option<CurrentRef>,
}

impl Cursor {
    fn new(node_start: u32, edge_start: u32) -> Self {
        Self {
            steps: Vec::new(),
            node_aliases: AliasTable::new('n', node_start),
            edge_aliases: AliasTable::new('e', edge_start),
            current: None,
        }
    }

    fn match_node(&mut self, label: impl Into<String>) {
        let label = label.into();
        let alias = self.node_aliases.allocate(label.clone());
        self.steps.push(Step::Match { label, alias: alias.clone() });
        self.current = Some(CurrentRef::Node(alias));
    }

    fn match_by_id(&mut self, id: impl Into<String>, label_hint: impl Into<String>) {
        let id = id.into();
        let alias = self.node_aliases.allocate(label_hint.into());
        self.steps.push(Step::MatchById { id, alias: alias.clone() });
        self.current = Some(CurrentRef::Node(alias));
    }

    fn as_alias(&mut self, user: impl Into<String>) -> Result<()> {
        let user = user.into();
        match &self.current {
            Some(CurrentRef::Node(internal)) => {
                self.node_aliases.register_user_alias(user.clone(), internal.clone());
                self.steps.push(Step::Alias { internal: internal.clone(), user });
                Ok(())
            }
            Some(CurrentRef::Edge(internal)) => {
                self.edge_aliases.register_user_alias(user.clone(), internal.clone());
                self.steps.push(Step::Alias { internal: internal.clone(), user });
                Ok(())
            }
            None => Err(Error::AliasError { alias: user }),
        }
    }

    fn traverse(&mut self, mut spec: TraversalSpec, to_label_hint: impl Into<String>) {
        let to_alias = self.node_aliases.allocate(to_label_hint.into());
        spec.to = to_alias.clone();
        // A caller that wants the traversed edge bound passes `edge_alias:
        // Some(_)` as a marker; the actual internal alias is allocated here.
        let edge_alias = spec
            .edge_alias
            .is_some()
            .then(|| self.edge_aliases.allocate(String::new()));
        spec.edge_alias = edge_alias.clone();
        self.steps.push(Step::Traversal(spec));
        self.current = Some(match edge_alias {
            Some(e) => CurrentRef::Edge(e),
            None => CurrentRef::Node(to_alias),
        });
    }

    fn hierarchy(&mut self, mut spec: HierarchySpec, to_label_hint: impl Into<String>) {
        let to_alias = self.node_aliases.allocate(to_label_hint.into());
        spec.to = to_alias.clone();
        self.steps.push(Step::Hierarchy(spec));
        self.current = Some(CurrentRef::Node(to_alias));
    }

    fn reachable(&mut self, mut spec: ReachableSpec, to_label_hint: impl Into<String>) {
        let to_alias = self.node_aliases.allocate(to_label_hint.into());
        spec.to = to_alias.clone();
        self.steps.push(Step::Reachable(spec));
        self.current = Some(CurrentRef::Node(to_alias));
    }

    fn where_(&mut self, conditions: Vec<Condition>) {
        self.steps.push(Step::Where { conditions });
    }

    fn order_by(&mut self, fields: Vec<OrderField>) {
        self.steps.push(Step::OrderBy { fields });
    }

    fn limit(&mut self, n: u64) {
        self.steps.push(Step::Limit(n));
    }

    fn skip(&mut self, n: u64) {
        self.steps.push(Step::Skip(n));
    }

    fn distinct(&mut self) {
        self.steps.push(Step::Distinct);
    }

    fn aggregate(&mut self, group_by: Vec<GroupByField>, aggregations: Vec<AggregateSpec>) {
        self.steps.push(Step::Aggregate { group_by, aggregations });
    }

    fn resolve_user_alias(&self, name: &str) -> Option<&str> {
        self.node_aliases.resolve_user_alias(name)
    }

    fn resolve_edge_user_alias(&self, name: &str) -> Option<&str> {
        self.edge_aliases.resolve_user_alias(name)
    }

    fn current_node_alias(&self) -> Option<&str> {
        match &self.current {
            Some(CurrentRef::Node(n)) => Some(n.as_str()),
            _ => None,
        }
    }
}

/// The top-level, immutable query value (§3.3, §4.2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryAst {
    cursor: Cursor,
    projection: Projection,
}

impl QueryAst {
    /// Builds an empty query with no steps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `Match(label, n_k)` — binds every node with `label` to a fresh
    /// internal alias (§4.3.1).
    #[must_use]
    pub fn match_node(mut self, label: impl Into<String>) -> Self {
        self.cursor.match_node(label);
        self
    }

    /// `MatchById(id, n_k)` — binds the single node with `id`, or yields no
    /// rows if absent (§4.3.1). `label_hint` is recorded for alias-table
    /// introspection only; it is not validated against the store.
    #[must_use]
    pub fn match_by_id(mut self, id: impl Into<String>, label_hint: impl Into<String>) -> Self {
        self.cursor.match_by_id(id, label_hint);
        self
    }

    /// Registers a user-facing name for the most recently bound node or
    /// edge alias.
    ///
    /// # Errors
    /// Returns [`Error::AliasError`] if nothing has been bound yet.
    pub fn as_alias(mut self, user: impl Into<String>) -> Result<Self> {
        self.cursor.as_alias(user)?;
        Ok(self)
    }

    /// Adds a one-hop or variable-length traversal from the current node
    /// (§4.3.2). `to_label_hint` is recorded for alias-table introspection;
    /// `spec.to` is overwritten with the freshly allocated internal alias.
    #[must_use]
    pub fn traverse(mut self, spec: TraversalSpec, to_label_hint: impl Into<String>) -> Self {
        self.cursor.traverse(spec, to_label_hint);
        self
    }

    /// Adds a hierarchy step (§4.3.3). `spec.to` is overwritten with the
    /// freshly allocated internal alias.
    #[must_use]
    pub fn hierarchy(mut self, spec: HierarchySpec, to_label_hint: impl Into<String>) -> Self {
        self.cursor.hierarchy(spec, to_label_hint);
        self
    }

    /// Adds a transitive-closure reachability step (§4.3.5). `spec.to` is
    /// overwritten with the freshly allocated internal alias.
    #[must_use]
    pub fn reachable(mut self, spec: ReachableSpec, to_label_hint: impl Into<String>) -> Self {
        self.cursor.reachable(spec, to_label_hint);
        self
    }

    /// Adds a `Where` step retaining rows matching every condition
    /// (§4.3.4).
    #[must_use]
    pub fn where_(mut self, conditions: Vec<Condition>) -> Self {
        self.cursor.where_(conditions);
        self
    }

    /// Adds an `OrderBy` step (§4.3.6).
    #[must_use]
    pub fn order_by(mut self, fields: Vec<OrderField>) -> Self {
        self.cursor.order_by(fields);
        self
    }

    /// Adds a `Limit` step (§4.3.6).
    #[must_use]
    pub fn limit(mut self, n: u64) -> Self {
        self.cursor.limit(n);
        self
    }

    /// Adds a `Skip` step (§4.3.6).
    #[must_use]
    pub fn skip(mut self, n: u64) -> Self {
        self.cursor.skip(n);
        self
    }

    /// Adds a `Distinct` step (§4.3.6).
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.cursor.distinct();
        self
    }

    /// Adds an `Aggregate` step (§4.3.7).
    #[must_use]
    pub fn aggregate(mut self, group_by: Vec<GroupByField>, aggregations: Vec<AggregateSpec>) -> Self {
        self.cursor.aggregate(group_by, aggregations);
        self
    }

    /// Adds a `Fork` step (§4.3.8): fans the current node out across
    /// `branches`, each built by `branch_fns[i]` from a fresh
    /// [`ForkBranchBuilder`] whose alias counters are offset from this
    /// AST's current counters by `stride * (i + 1)` (§4.2, invariant 10).
    /// After the fork, this AST's own counters advance past the highest
    /// counter used by any branch.
    ///
    /// # Errors
    /// Returns [`Error::AliasError`] if no node is currently bound to fork
    /// from.
    pub fn fork(
        mut self,
        stride: u32,
        branch_fns: Vec<Box<dyn FnOnce(ForkBranchBuilder) -> ForkBranchBuilder>>,
    ) -> Result<Self> {
        let source = self
            .cursor
            .current_node_alias()
            .ok_or_else(|| Error::AliasError { alias: "<fork source>".to_string() })?
            .to_string();

        let stride = stride.max(graphq_common::config::MIN_FORK_ALIAS_STRIDE);
        let mut max_node_counter = self.cursor.node_aliases.counter();
        let mut max_edge_counter = self.cursor.edge_aliases.counter();
        let mut branches = Vec::with_capacity(branch_fns.len());

        for (i, build) in branch_fns.into_iter().enumerate() {
            let offset = stride * (i as u32 + 1);
            let branch_builder = ForkBranchBuilder::new(
                self.cursor.node_aliases.counter() + offset,
                self.cursor.edge_aliases.counter() + offset,
            );
            let branch = build(branch_builder).finish();
            max_node_counter = max_node_counter.max(branch.node_aliases.counter());
            max_edge_counter = max_edge_counter.max(branch.edge_aliases.counter());

            // A branch's user aliases live in its own offset alias table
            // while it's being built, but projections resolve user aliases
            // against the top-level AST (§4.3.9) — so every name a branch
            // registers is re-exposed here once the branch is finished.
            // The internal alias itself is adopted too (not just the user
            // name), since a caller who resolves "reaction" to "n10" and
            // then builds a post-fork `Where`/`Aggregate`/`OrderBy` step
            // naming "n10" directly needs that alias to validate.
            for (user, internal) in branch.node_aliases.user_aliases() {
                self.cursor.node_aliases.register_user_alias(user.to_string(), internal.to_string());
                if let Some(label) = branch.node_aliases.label_of(internal) {
                    self.cursor.node_aliases.adopt_internal(internal.to_string(), label.to_string());
                }
            }
            for (user, internal) in branch.edge_aliases.user_aliases() {
                self.cursor.edge_aliases.register_user_alias(user.to_string(), internal.to_string());
                if let Some(label) = branch.edge_aliases.label_of(internal) {
                    self.cursor.edge_aliases.adopt_internal(internal.to_string(), label.to_string());
                }
            }

            branches.push(branch);
        }

        self.cursor.node_aliases.set_counter(max_node_counter);
        self.cursor.edge_aliases.set_counter(max_edge_counter);
        self.cursor.steps.push(Step::Fork { source, branches });
        Ok(self)
    }

    /// Sets the projection descriptor.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Resolves a user-facing node alias to its internal alias.
    #[must_use]
    pub fn resolve_user_alias(&self, name: &str) -> Option<&str> {
        self.cursor.resolve_user_alias(name)
    }

    /// Resolves a user-facing edge alias to its internal alias.
    #[must_use]
    pub fn resolve_edge_user_alias(&self, name: &str) -> Option<&str> {
        self.cursor.resolve_edge_user_alias(name)
    }

    /// Returns the internal alias of the node currently bound (the most
    /// recent `match_node`/`match_by_id`/`traverse`/`hierarchy`/`reachable`
    /// result that was a node, not an edge), used by `single`/`collection`
    /// projections when no node alias was explicitly requested (§4.3.9).
    #[must_use]
    pub fn current_node_alias(&self) -> Option<&str> {
        self.cursor.current_node_alias()
    }

    /// Returns the ordered steps.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.cursor.steps
    }

    /// Returns the projection descriptor.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Validates that every alias referenced by a step or by the
    /// projection was actually registered (§4.2).
    ///
    /// # Errors
    /// Returns [`Error::AliasError`] naming the first unresolved alias.
    pub fn validate(&self) -> Result<()> {
        validate_steps(&self.cursor.steps, &self.cursor.node_aliases, &self.cursor.edge_aliases, None, None)?;

        for alias in &self.projection.node_aliases {
            if self.resolve_user_alias(alias).is_none() {
                return Err(Error::AliasError { alias: alias.clone() });
            }
        }
        for alias in &self.projection.edge_aliases {
            if self.resolve_edge_user_alias(alias).is_none() {
                return Err(Error::AliasError { alias: alias.clone() });
            }
        }
        for spec in &self.projection.collect {
            if self.resolve_user_alias(&spec.source_alias).is_none() {
                return Err(Error::AliasError { alias: spec.source_alias.clone() });
            }
        }
        Ok(())
    }

    /// Serializes this AST to its passive, lossless JSON form (§6.3).
    ///
    /// # Errors
    /// Returns an error if serialization fails (should not happen for a
    /// well-formed AST).
    pub fn to_passive_representation(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Reconstructs an AST from its passive JSON form (§6.3).
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid serialized AST.
    pub fn from_passive_representation(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Builds one [`Branch`] of a [`Step::Fork`] (§4.2, §4.3.8).
///
/// Exposes the same step-building vocabulary as [`QueryAst`] except
/// `match_node`/`match_by_id`/`fork` — a branch begins already bound to the
/// fork's source node (the engine supplies that binding at execution time,
/// §4.3.8) and branches do not themselves fan out further.
pub struct ForkBranchBuilder {
    cursor: Cursor,
}

impl ForkBranchBuilder {
    fn new(node_start: u32, edge_start: u32) -> Self {
        Self { cursor: Cursor::new(node_start, edge_start) }
    }

    /// Registers a user-facing name for the most recently bound alias.
    ///
    /// # Errors
    /// Returns [`Error::AliasError`] if nothing has been bound yet.
    pub fn as_alias(mut self, user: impl Into<String>) -> Result<Self> {
        self.cursor.as_alias(user)?;
        Ok(self)
    }

    /// Adds a traversal step within the branch (§4.3.2, §4.3.8 — the
    /// engine treats every branch traversal as optional regardless of the
    /// flag set here).
    #[must_use]
    pub fn traverse(mut self, spec: TraversalSpec, to_label_hint: impl Into<String>) -> Self {
        self.cursor.traverse(spec, to_label_hint);
        self
    }

    /// Adds a `Where` step within the branch.
    #[must_use]
    pub fn where_(mut self, conditions: Vec<Condition>) -> Self {
        self.cursor.where_(conditions);
        self
    }

    /// Adds a `Distinct` step within the branch.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.cursor.distinct();
        self
    }

    /// Adds an `Aggregate` step within the branch.
    #[must_use]
    pub fn aggregate(mut self, group_by: Vec<GroupByField>, aggregations: Vec<AggregateSpec>) -> Self {
        self.cursor.aggregate(group_by, aggregations);
        self
    }

    fn finish(self) -> Branch {
        Branch {
            steps: self.cursor.steps,
            node_aliases: self.cursor.node_aliases,
            edge_aliases: self.cursor.edge_aliases,
        }
    }
}

/// Whether `alias` is registered as a node alias, checking a fork branch's
/// own table first and falling back to its parent's (a branch's first
/// step commonly references the fork source alias, which lives in the
/// parent's table, not the branch's own offset range).
fn has_node_alias(nodes: &AliasTable, parent_nodes: Option<&AliasTable>, alias: &str) -> bool {
    nodes.contains_internal(alias) || parent_nodes.is_some_and(|p| p.contains_internal(alias))
}

fn has_edge_alias(edges: &AliasTable, parent_edges: Option<&AliasTable>, alias: &str) -> bool {
    edges.contains_internal(alias) || parent_edges.is_some_and(|p| p.contains_internal(alias))
}

/// Walks `steps`, checking every `from-alias`/`target` a step mentions was
/// already registered (§4.2). `parent_nodes`/`parent_edges` are the
/// enclosing scope's tables, consulted as a fallback — only relevant when
/// validating a fork branch, whose own tables start at an offset range
/// and don't themselves contain the fork's source alias.
fn validate_steps(
    steps: &[Step],
    nodes: &AliasTable,
    edges: &AliasTable,
    parent_nodes: Option<&AliasTable>,
    parent_edges: Option<&AliasTable>,
) -> Result<()> {
    let node_ok = |alias: &str| has_node_alias(nodes, parent_nodes, alias);
    let edge_ok = |alias: &str| has_edge_alias(edges, parent_edges, alias);
    let require_node = |alias: &str| {
        if node_ok(alias) { Ok(()) } else { Err(Error::AliasError { alias: alias.to_string() }) }
    };

    for step in steps {
        match step {
            Step::Match { .. } | Step::MatchById { .. } => {}
            Step::Traversal(spec) => require_node(&spec.from)?,
            Step::Where { conditions } => {
                for condition in conditions {
                    validate_condition(condition, &node_ok)?;
                }
            }
            Step::Hierarchy(spec) => require_node(&spec.from)?,
            Step::Reachable(spec) => require_node(&spec.from)?,
            Step::OrderBy { .. } | Step::Limit(_) | Step::Skip(_) | Step::Distinct => {
                // An OrderBy target may legitimately name a computed
                // (e.g. aggregation) key rather than a node/edge alias
                // (§9 "ORDER BY on aggregation aliases"), so it isn't
                // checked against the alias tables here.
            }
            Step::Aggregate { group_by, aggregations } => {
                for group in group_by {
                    require_node(&group.alias)?;
                }
                for agg in aggregations {
                    if let Some(source) = &agg.source {
                        if !node_ok(source) && !edge_ok(source) {
                            return Err(Error::AliasError { alias: source.clone() });
                        }
                    }
                }
            }
            Step::Alias { internal, user } => {
                if !node_ok(internal) && !edge_ok(internal) {
                    return Err(Error::AliasError { alias: user.clone() });
                }
            }
            Step::Fork { source, branches } => {
                require_node(source)?;
                for branch in branches {
                    validate_steps(&branch.steps, &branch.node_aliases, &branch.edge_aliases, Some(nodes), Some(edges))?;
                }
            }
        }
    }
    Ok(())
}

fn validate_condition(condition: &Condition, node_ok: &impl Fn(&str) -> bool) -> Result<()> {
    match condition {
        Condition::Comparison { target, .. } | Condition::Exists { target, .. } | Condition::ConnectedTo { target, .. } => {
            if node_ok(target) {
                Ok(())
            } else {
                Err(Error::AliasError { alias: target.clone() })
            }
        }
        Condition::Logical { children, .. } => {
            for child in children {
                validate_condition(child, node_ok)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EdgeDirection;

    fn simple_traversal(from: &str, edge_types: Vec<String>) -> TraversalSpec {
        TraversalSpec {
            from: from.to_string(),
            to: String::new(),
            edge_alias: None,
            edge_types,
            direction: EdgeDirection::Out,
            to_labels: vec![],
            optional: false,
            edge_conditions: vec![],
            variable_length: None,
        }
    }

    #[test]
    fn match_then_as_alias_registers_user_alias() {
        let ast = QueryAst::new().match_node("person").as_alias("p").unwrap();
        assert_eq!(ast.resolve_user_alias("p"), Some("n0"));
    }

    #[test]
    fn as_alias_without_a_bound_entity_errors() {
        let err = QueryAst::new().as_alias("p").unwrap_err();
        assert!(matches!(err, Error::AliasError { .. }));
    }

    #[test]
    fn fork_branches_get_non_colliding_alias_ranges() {
        let ast = QueryAst::new()
            .match_node("message")
            .as_alias("m")
            .unwrap()
            .fork(
                10,
                vec![
                    Box::new(|b: ForkBranchBuilder| {
                        b.traverse(simple_traversal("n0", vec!["replyTo".into()]), "message")
                    }),
                    Box::new(|b: ForkBranchBuilder| {
                        b.traverse(simple_traversal("n0", vec!["hasReaction".into()]), "reaction")
                    }),
                ],
            )
            .unwrap();

        let Step::Fork { branches, .. } = ast.steps().last().unwrap() else {
            panic!("expected a fork step");
        };

        let first_alias = match &branches[0].steps[0] {
            Step::Traversal(spec) => spec.to.clone(),
            _ => panic!("expected a traversal"),
        };
        let second_alias = match &branches[1].steps[0] {
            Step::Traversal(spec) => spec.to.clone(),
            _ => panic!("expected a traversal"),
        };
        assert_ne!(first_alias, second_alias);
        assert_eq!(first_alias, "n10");
        assert_eq!(second_alias, "n20");
    }

    #[test]
    fn fork_branch_user_aliases_resolve_at_the_top_level() {
        let ast = QueryAst::new()
            .match_node("message")
            .as_alias("m")
            .unwrap()
            .fork(
                10,
                vec![Box::new(|b: ForkBranchBuilder| {
                    b.traverse(simple_traversal("n0", vec!["hasReaction".into()]), "reaction")
                        .as_alias("reaction")
                        .unwrap()
                })],
            )
            .unwrap();

        assert_eq!(ast.resolve_user_alias("reaction"), Some("n10"));
    }

    #[test]
    fn validate_rejects_unknown_projection_alias() {
        let ast = QueryAst::new()
            .match_node("person")
            .as_alias("p")
            .unwrap()
            .with_projection(Projection {
                kind: Some(ProjectionKind::Collection),
                node_aliases: vec!["ghost".to_string()],
                ..Projection::default()
            });
        assert!(ast.validate().is_err());
    }

    #[test]
    fn validate_rejects_traversal_from_an_unregistered_alias() {
        let mut ast = QueryAst::new().match_node("person").as_alias("p").unwrap();
        // Bypass the builder's own alias allocation to simulate a
        // hand-built or deserialized AST referencing a typo'd alias.
        ast.cursor.steps.push(Step::Traversal(simple_traversal("n99", vec!["knows".into()])));
        assert!(matches!(ast.validate(), Err(Error::AliasError { alias }) if alias == "n99"));
    }

    #[test]
    fn validate_accepts_fork_branch_referencing_the_parent_source_alias() {
        let ast = QueryAst::new()
            .match_node("message")
            .as_alias("m")
            .unwrap()
            .fork(
                10,
                vec![Box::new(|b: ForkBranchBuilder| {
                    b.traverse(simple_traversal("n0", vec!["hasReaction".into()]), "reaction")
                        .as_alias("reaction")
                        .unwrap()
                })],
            )
            .unwrap();
        assert!(ast.validate().is_ok());
    }

    #[test]
    fn validate_accepts_a_post_fork_step_naming_a_resolved_branch_alias() {
        let mut ast = QueryAst::new()
            .match_node("message")
            .as_alias("m")
            .unwrap()
            .fork(
                10,
                vec![Box::new(|b: ForkBranchBuilder| {
                    b.traverse(simple_traversal("n0", vec!["hasReaction".into()]), "reaction")
                        .as_alias("reaction")
                        .unwrap()
                })],
            )
            .unwrap();
        let reaction_internal = ast.resolve_user_alias("reaction").unwrap().to_string();
        ast.cursor.steps.push(Step::Where {
            conditions: vec![Condition::Exists {
                target: reaction_internal,
                edge_type: None,
                direction: EdgeDirection::Out,
                negated: false,
            }],
        });
        assert!(ast.validate().is_ok());
    }

    #[test]
    fn ast_round_trips_through_passive_representation() {
        let ast = QueryAst::new().match_node("person").as_alias("p").unwrap();
        let json = ast.to_passive_representation().unwrap();
        let restored = QueryAst::from_passive_representation(&json).unwrap();
        assert_eq!(ast, restored);
    }
}
