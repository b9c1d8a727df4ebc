//! Core value types shared by the store, the AST and the engine.

mod id;
mod value;

pub use id::{EdgeId, NodeId};
pub use value::{LogicalType, PropertyKey, Timestamp, Value};
