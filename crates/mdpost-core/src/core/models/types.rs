use std::collections::HashMap;

/// An append-only interned table of particle type names.
///
/// Each distinct name is assigned a dense index in first-seen order. Once
/// assigned, an index is never reassigned for the lifetime of the registry,
/// so analyses can size flat accumulator arrays by [`TypeRegistry::len`] and
/// index them by the value returned from [`TypeRegistry::intern`].
///
/// The registry is not thread-safe; trajectories populate it during their
/// single-threaded read pass.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dense index for `name`, registering it on first use.
    pub fn intern(&mut self, name: &str) -> usize {
        if let Some(&index) = self.indices.get(name) {
            return index;
        }
        let index = self.names.len();
        self.names.push(name.to_string());
        self.indices.insert(name.to_string(), index);
        index
    }

    /// Returns the index of `name` if it has been registered.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Returns the name registered at `index`, if any.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns the number of distinct registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names have been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Removes all registered names, resetting index assignment.
    pub fn clear(&mut self) {
        self.names.clear();
        self.indices.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_assigns_dense_indices_in_first_seen_order() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.intern("Na"), 0);
        assert_eq!(registry.intern("Cl"), 1);
        assert_eq!(registry.intern("O"), 2);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn intern_is_idempotent() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.intern("Na"), 0);
        assert_eq!(registry.intern("Cl"), 1);
        assert_eq!(registry.intern("Na"), 0);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn lookup_is_bidirectional() {
        let mut registry = TypeRegistry::new();
        registry.intern("Na");
        registry.intern("Cl");

        assert_eq!(registry.index_of("Cl"), Some(1));
        assert_eq!(registry.index_of("K"), None);
        assert_eq!(registry.name_of(0), Some("Na"));
        assert_eq!(registry.name_of(2), None);
    }

    #[test]
    fn clear_resets_index_assignment() {
        let mut registry = TypeRegistry::new();
        registry.intern("Na");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.index_of("Na"), None);
        assert_eq!(registry.intern("Cl"), 0);
    }

    #[test]
    fn empty_name_is_a_valid_type() {
        let mut registry = TypeRegistry::new();
        assert_eq!(registry.intern(""), 0);
        assert_eq!(registry.index_of(""), Some(0));
    }
}
