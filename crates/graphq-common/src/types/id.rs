//! Opaque string identifiers for nodes and edges.
//!
//! The teacher's store uses `u64` newtypes generated internally; this spec
//! instead requires callers to supply an opaque, immutable string id per
//! entity (see §3.1), so `NodeId`/`EdgeId` wrap `String` rather than an
//! integer. An [`crate::id_gen::IdGenerator`] is provided as a convenience
//! for callers without their own id scheme.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Builds an id from any string-like value.
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            /// Returns the id as a plain string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:?})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id.into())
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.into())
            }
        }
    };
}

string_id!(NodeId, "The opaque, immutable identity of a stored node.");
string_id!(EdgeId, "The opaque, immutable identity of a stored edge.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_equality_is_by_value() {
        assert_eq!(NodeId::new("a"), NodeId::new("a".to_string()));
        assert_ne!(NodeId::new("a"), NodeId::new("b"));
    }

    #[test]
    fn node_id_orders_like_its_string() {
        let mut ids = vec![NodeId::new("c"), NodeId::new("a"), NodeId::new("b")];
        ids.sort();
        assert_eq!(ids, vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")]);
    }
}
