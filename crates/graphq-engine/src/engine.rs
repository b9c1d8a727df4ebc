//! [`Engine`] — the `execute` entry point tying the step pipeline and
//! projection together (§4.3).

use crate::projection::apply_projection;
use crate::row::Row;
use crate::steps::execute_steps;
use graphq_ast::QueryAst;
use graphq_common::config::EngineConfig;
use graphq_common::error::Result;
use graphq_core::GraphStore;
use serde_json::Value as Json;
use tracing::info_span;

/// The query engine: a pure interpreter holding only its [`EngineConfig`].
///
/// An `Engine` carries no reference to any particular [`GraphStore`] — the
/// same instance interprets any AST against any store passed to
/// [`Engine::execute`], mirroring the teacher's split between a stateless
/// execution component and the store/session objects that own data
/// (`graphos-engine/src/{session.rs,database.rs}`).
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Builds an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Interprets `ast` against `store`, producing a finite sequence of
    /// result records (§4.3):
    ///
    /// 1. Start with a single empty row.
    /// 2. Fold each step over the row set in order, stopping early once it
    ///    is empty.
    /// 3. Apply the projection to the final row set.
    ///
    /// # Errors
    /// Returns [`graphq_common::error::Error::AliasError`] if `ast`
    /// references an alias that was never registered (§4.2), or
    /// [`graphq_common::error::Error::Cardinality`] if a `single`
    /// projection produced zero or more than one result.
    pub fn execute(&self, ast: &QueryAst, store: &GraphStore) -> Result<Vec<Json>> {
        ast.validate()?;

        let span = info_span!("query_execute", step_count = ast.steps().len());
        let _guard = span.enter();

        let rows = execute_steps(vec![Row::new()], ast.steps(), store, &self.config);
        apply_projection(&rows, ast, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphq_common::types::NodeId;

    #[test]
    fn empty_store_yields_empty_collection() {
        let engine = Engine::new(EngineConfig::default());
        let store = GraphStore::new();
        let ast = QueryAst::new().match_node("person");
        let rows = engine.execute(&ast, &store).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn match_by_id_on_missing_node_yields_no_rows() {
        let engine = Engine::new(EngineConfig::default());
        let store = GraphStore::new();
        let ast = QueryAst::new().match_by_id("ghost", "person");
        let rows = engine.execute(&ast, &store).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn single_projection_requires_exactly_one_row() {
        let engine = Engine::new(EngineConfig::default());
        let store = GraphStore::new();
        store.create_node(NodeId::new("p1"), "person", []).unwrap();
        store.create_node(NodeId::new("p2"), "person", []).unwrap();

        let ast = QueryAst::new()
            .match_node("person")
            .as_alias("p")
            .unwrap()
            .with_projection(graphq_ast::Projection {
                kind: Some(graphq_ast::ProjectionKind::Single),
                node_aliases: vec!["p".to_string()],
                ..graphq_ast::Projection::default()
            });

        let err = engine.execute(&ast, &store).unwrap_err();
        assert!(matches!(err, graphq_common::error::Error::Cardinality { found: 2 }));
    }
}
