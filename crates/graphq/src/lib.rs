//! # graphq
//!
//! An in-memory, typed property-graph engine with an algebraic query
//! language. If you're new here, start with [`GraphDatabase`] — that's the
//! entry point for storing nodes and edges and running queries against
//! them.
//!
//! Grounded on `grafeo/src/lib.rs` for the crate-level re-export shape and
//! doctest quick-start, and on `graphos-engine/src/{database.rs,session.rs}`
//! for the `GraphDatabase`/`Session` split — adapted to this engine's
//! simpler single-level transaction model (§5): a [`Session`] delegates
//! straight to [`GraphStore::begin`]/[`GraphStore::commit`]/
//! [`GraphStore::rollback`] rather than coordinating its own `TxId` through
//! a separate transaction manager, since only one transaction can be open
//! per store at a time.
//!
//! ## Quick Start
//!
//! ```rust
//! use graphq::GraphDatabase;
//! use graphq_ast::QueryAst;
//! use graphq_common::types::{NodeId, PropertyKey, Value};
//!
//! let db = GraphDatabase::new();
//! db.store().create_node(
//!     NodeId::new("alice"),
//!     "person",
//!     [(PropertyKey::new("name"), Value::from("Alice"))],
//! )?;
//!
//! let query = QueryAst::new().match_node("person").as_alias("p")?;
//! let records = db.execute(&query)?;
//! assert_eq!(records.len(), 1);
//! # Ok::<(), graphq_common::error::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// Re-export the query-building and execution API.
pub use graphq_ast::QueryAst;
pub use graphq_common::config::EngineConfig;
pub use graphq_common::error::{Error, Result, TransactionError};
pub use graphq_core::{Direction, Edge, GraphStore, Node, StoreStats};
pub use graphq_engine::Engine;

use serde_json::Value as Json;

/// The entry point for storing graph data and running queries against it.
///
/// A `GraphDatabase` owns exactly one [`GraphStore`] and one [`Engine`].
/// Both are cheap to hold behind a shared reference — the store is
/// internally synchronized and the engine carries only its configuration —
/// so the same `GraphDatabase` can back multiple [`Session`]s.
pub struct GraphDatabase {
    store: GraphStore,
    engine: Engine,
}

impl Default for GraphDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphDatabase {
    /// Creates a new, empty in-memory graph with the engine's default
    /// configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a new, empty in-memory graph with the given engine
    /// configuration (recursion depth cap, fork alias stride, default depth
    /// alias, query logging).
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            store: GraphStore::new(),
            engine: Engine::new(config),
        }
    }

    /// Returns the underlying graph store, for direct node/edge mutation
    /// and index registration outside of query execution.
    #[must_use]
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Returns the engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }

    /// Runs `query` against this database's store and returns its result
    /// records.
    ///
    /// # Errors
    /// See [`Engine::execute`].
    pub fn execute(&self, query: &QueryAst) -> Result<Vec<Json>> {
        self.engine.execute(query, &self.store)
    }

    /// Opens a session bound to this database, for grouping a sequence of
    /// queries and mutations under one transaction.
    #[must_use]
    pub fn session(&self) -> Session<'_> {
        Session { db: self }
    }
}

/// A transactional handle onto a [`GraphDatabase`] (§5).
///
/// Sessions make the single-level transaction model explicit at the call
/// site. There is no nesting and no independent transaction id: the store
/// itself rejects a second `begin` while one is already open.
pub struct Session<'a> {
    db: &'a GraphDatabase,
}

impl<'a> Session<'a> {
    /// Returns the database this session is bound to.
    #[must_use]
    pub fn database(&self) -> &'a GraphDatabase {
        self.db
    }

    /// Begins a transaction, snapshotting the store's current state (§5).
    ///
    /// # Errors
    /// Returns an error if a transaction is already open.
    pub fn begin(&self) -> Result<()> {
        self.db.store.begin()
    }

    /// Commits the open transaction, making its mutations durable (§5).
    ///
    /// # Errors
    /// Returns an error if no transaction is open.
    pub fn commit(&self) -> Result<()> {
        self.db.store.commit()
    }

    /// Rolls back the open transaction, restoring the pre-`begin` state
    /// (§5).
    ///
    /// # Errors
    /// Returns an error if no transaction is open.
    pub fn rollback(&self) -> Result<()> {
        self.db.store.rollback()
    }

    /// Runs `query` against the session's database.
    ///
    /// # Errors
    /// See [`Engine::execute`].
    pub fn execute(&self, query: &QueryAst) -> Result<Vec<Json>> {
        self.db.execute(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphq_common::types::{NodeId, PropertyKey, Value};

    #[test]
    fn execute_runs_a_query_against_the_database_store() {
        let db = GraphDatabase::new();
        db.store().create_node(NodeId::new("a1"), "person", [(PropertyKey::new("name"), Value::from("Ada"))]).unwrap();

        let query = QueryAst::new().match_node("person").as_alias("p").unwrap();
        let records = db.execute(&query).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["p"]["name"], "Ada");
    }

    #[test]
    fn session_rollback_discards_mutations() {
        let db = GraphDatabase::new();
        db.store().create_node(NodeId::new("a1"), "person", []).unwrap();

        let session = db.session();
        session.begin().unwrap();
        db.store().create_node(NodeId::new("a2"), "person", []).unwrap();
        session.rollback().unwrap();

        assert_eq!(db.store().stats().node_count, 1);
    }

    #[test]
    fn session_begin_twice_is_rejected() {
        let db = GraphDatabase::new();
        let session = db.session();
        session.begin().unwrap();
        let err = session.begin().unwrap_err();
        assert!(matches!(err, Error::TransactionState(TransactionError::AlreadyActive)));
    }
}
