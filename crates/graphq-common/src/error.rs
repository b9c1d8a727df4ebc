//! The crate-wide error taxonomy (§7).
//!
//! Grounded on the teacher's `OperatorError` (thiserror, structured fields
//! rather than pre-formatted strings) and `Session`'s nested
//! `TransactionError` arm.

use thiserror::Error;

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy from §7.
///
/// `RecursionCap` is deliberately absent from this enum: per spec it is
/// informational-only and is reported through a `tracing::warn!` event
/// (§7.1), never raised as an `Err`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A required node or edge was not found.
    #[error("not found: {kind} {id}")]
    NotFound {
        /// `"node"` or `"edge"`.
        kind: &'static str,
        /// The id that was looked up.
        id: String,
    },

    /// A node or edge was created with an id already present in the store.
    #[error("duplicate id: {kind} {id}")]
    DuplicateId {
        /// `"node"` or `"edge"`.
        kind: &'static str,
        /// The id that collided.
        id: String,
    },

    /// An edge was created referencing a missing endpoint.
    #[error("endpoint missing: edge {edge_id} references non-existent node {node_id}")]
    EndpointMissing {
        /// The edge id being created.
        edge_id: String,
        /// The missing endpoint node id.
        node_id: String,
    },

    /// An AST step or projection referenced an alias that was never
    /// registered.
    #[error("unknown alias: {alias}")]
    AliasError {
        /// The unresolved alias.
        alias: String,
    },

    /// A "single" projection produced zero or more than one result.
    #[error("cardinality violation: expected exactly one result, found {found}")]
    Cardinality {
        /// The number of results actually produced.
        found: usize,
    },

    /// A transaction was begun while one was already active, or
    /// commit/rollback was called with none active.
    #[error("transaction state error: {0}")]
    TransactionState(#[from] TransactionError),

    /// A property value did not match the shape declared in a [`crate::schema::Schema`].
    ///
    /// Never raised by this crate's own `Store`/`Engine` — reserved for
    /// external mutation callers that choose to validate against a
    /// [`crate::schema::Schema`] themselves (§6.2.2).
    #[error("schema validation failed: {reason}")]
    SchemaValidation {
        /// A human-readable description of the violation.
        reason: String,
    },
}

/// Transaction state violations, nested under [`Error::TransactionState`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionError {
    /// `begin` was called while a transaction was already active.
    #[error("a transaction is already in progress")]
    AlreadyActive,
    /// `commit`/`rollback` was called with no active transaction.
    #[error("no transaction is currently active")]
    NoActiveTransaction,
}
