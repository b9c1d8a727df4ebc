//! Alias allocation and resolution (§4.2).
//!
//! Node aliases are drawn from a monotonic counter `n0, n1, …`; edge
//! aliases from `e0, e1, …`. A user-alias maps to the internal alias
//! current at the time `.as_alias()` is attached. Fork branches allocate
//! from a counter offset by a stride (§4.2, §9 invariant 10) so aliases
//! from different branches never collide.

use std::collections::HashMap;

/// An alias namespace: either all node aliases (`n…`) or all edge aliases
/// (`e…`) in one [`crate::builder::QueryAst`] or [`crate::step::Branch`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AliasTable {
    prefix: char,
    counter: u32,
    /// user-alias -> internal-alias
    user_to_internal: HashMap<String, String>,
    /// internal-alias -> label (node label or edge type it was bound with)
    internal_to_label: HashMap<String, String>,
}

impl AliasTable {
    /// Builds an alias table whose internal aliases are prefixed with
    /// `prefix` (`'n'` or `'e'`), counting up from `start`.
    #[must_use]
    pub fn new(prefix: char, start: u32) -> Self {
        Self {
            prefix,
            counter: start,
            user_to_internal: HashMap::new(),
            internal_to_label: HashMap::new(),
        }
    }

    /// Allocates a fresh internal alias bound to `label`, advancing the
    /// counter.
    pub fn allocate(&mut self, label: impl Into<String>) -> String {
        let internal = format!("{}{}", self.prefix, self.counter);
        self.counter += 1;
        self.internal_to_label.insert(internal.clone(), label.into());
        internal
    }

    /// Registers a user-facing alias for an already-allocated internal
    /// alias.
    pub fn register_user_alias(&mut self, user: impl Into<String>, internal: impl Into<String>) {
        self.user_to_internal.insert(user.into(), internal.into());
    }

    /// Resolves a user alias to its internal alias.
    #[must_use]
    pub fn resolve_user_alias(&self, user: &str) -> Option<&str> {
        self.user_to_internal.get(user).map(String::as_str)
    }

    /// Returns whether `internal` has been allocated in this table.
    #[must_use]
    pub fn contains_internal(&self, internal: &str) -> bool {
        self.internal_to_label.contains_key(internal)
    }

    /// Returns the label/type an internal alias was allocated with.
    #[must_use]
    pub fn label_of(&self, internal: &str) -> Option<&str> {
        self.internal_to_label.get(internal).map(String::as_str)
    }

    /// Returns the current counter value (the next alias to be allocated).
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Overwrites the counter, used to re-seed a parent table past the
    /// highest counter used by any fork branch (§4.2).
    pub fn set_counter(&mut self, counter: u32) {
        self.counter = counter;
    }

    /// Iterates every registered user alias and the internal alias it maps to.
    pub fn user_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.user_to_internal.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Registers an internal alias allocated by a *different* table (a fork
    /// branch's offset counter range) as also valid in this one, without
    /// touching this table's own counter. Used when folding a finished
    /// branch's user aliases into the parent AST (§4.2, invariant 10):
    /// once `resolve_user_alias` can hand a caller a branch-internal alias
    /// like `n10`, that alias must also pass `contains_internal` here, or a
    /// post-fork step naming it would be rejected as unregistered even
    /// though the merged row really does carry that binding.
    pub fn adopt_internal(&mut self, internal: impl Into<String>, label: impl Into<String>) {
        self.internal_to_label.insert(internal.into(), label.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_advances_counter_and_remembers_label() {
        let mut table = AliasTable::new('n', 0);
        let a = table.allocate("person");
        let b = table.allocate("post");
        assert_eq!(a, "n0");
        assert_eq!(b, "n1");
        assert_eq!(table.label_of("n0"), Some("person"));
        assert_eq!(table.counter(), 2);
    }

    #[test]
    fn user_alias_resolves_to_internal() {
        let mut table = AliasTable::new('n', 0);
        let internal = table.allocate("person");
        table.register_user_alias("p", internal.clone());
        assert_eq!(table.resolve_user_alias("p"), Some(internal.as_str()));
        assert_eq!(table.resolve_user_alias("missing"), None);
    }
}
