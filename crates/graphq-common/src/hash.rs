//! Fast, non-cryptographic hash map/set aliases.
//!
//! Node and edge ids are opaque strings (see [`crate::types`]), so the store
//! and engine look entities up through hash maps constantly; `ahash` trades
//! DoS resistance we don't need for speed we do.

use hashbrown::{HashMap, HashSet};

/// A hash map keyed with `ahash` instead of the stdlib's SipHash.
pub type FxHashMap<K, V> = HashMap<K, V, ahash::RandomState>;

/// A hash set keyed with `ahash` instead of the stdlib's SipHash.
pub type FxHashSet<T> = HashSet<T, ahash::RandomState>;
