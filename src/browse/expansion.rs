use std::collections::HashMap;

/// Per-traversal expand/collapse state, keyed by node path.
///
/// Entries are created lazily on first toggle; an unknown key reads as
/// collapsed. Entries for nodes that disappear from the snapshot are never
/// pruned — they are harmless and keep a folder's expansion across resyncs.
/// Keys are full paths, never bare names, so sibling groups at different
/// depths sharing a name cannot collide.
#[derive(Debug, Default)]
pub struct ExpansionStore {
    expanded: HashMap<String, bool>,
}

impl ExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the expanded flag for `key`. Other keys are unaffected.
    pub fn toggle(&mut self, key: &str) {
        let entry = self.expanded.entry(key.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// Whether `key` is expanded; unknown keys default to collapsed.
    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_collapsed() {
        let store = ExpansionStore::new();
        assert!(!store.is_expanded("2024"));
    }

    #[test]
    fn toggle_expands_then_collapses() {
        let mut store = ExpansionStore::new();
        store.toggle("2024");
        assert!(store.is_expanded("2024"));
        store.toggle("2024");
        assert!(!store.is_expanded("2024"));
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut store = ExpansionStore::new();
        store.toggle("2024");
        let before = store.is_expanded("2024");
        store.toggle("2024");
        store.toggle("2024");
        assert_eq!(store.is_expanded("2024"), before);
    }

    #[test]
    fn toggle_does_not_affect_other_keys() {
        let mut store = ExpansionStore::new();
        store.toggle("2024");
        store.toggle("2023");
        store.toggle("2023");
        assert!(store.is_expanded("2024"));
        assert!(!store.is_expanded("2023"));
    }

    #[test]
    fn path_keys_keep_same_names_apart() {
        let mut store = ExpansionStore::new();
        store.toggle("2024/drafts");
        assert!(store.is_expanded("2024/drafts"));
        assert!(!store.is_expanded("2023/drafts"));
    }
}
