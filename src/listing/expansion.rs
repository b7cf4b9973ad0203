use std::collections::HashSet;

/// Set of item IDs whose children are part of the shown sequence.
///
/// Collapsing an item only unmarks that item; marks on its descendants are
/// kept so that re-expanding restores the previous depth.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is marked expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Mark `id` expanded. Returns `true` if it was not marked before.
    pub fn mark(&mut self, id: &str) -> bool {
        if self.expanded.contains(id) {
            return false;
        }
        self.expanded.insert(id.to_string())
    }

    /// Unmark `id`. Returns `true` if it was marked.
    pub fn unmark(&mut self, id: &str) -> bool {
        self.expanded.remove(id)
    }

    /// Forget every expanded item.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Expanded IDs ordered so that ancestors come before descendants.
    pub fn sorted(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.expanded.iter().map(String::as_str).collect();
        ids.sort_by(|a, b| {
            super::path::depth_of(a)
                .cmp(&super::path::depth_of(b))
                .then_with(|| a.cmp(b))
        });
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_unmark() {
        let mut state = ExpansionState::new();
        assert!(state.mark("docs"));
        assert!(!state.mark("docs"));
        assert!(state.is_expanded("docs"));
        assert!(state.unmark("docs"));
        assert!(!state.unmark("docs"));
        assert!(state.is_empty());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut state = ExpansionState::new();
        state.mark("a");
        state.mark("a/b");
        assert_eq!(state.len(), 2);
        state.clear();
        assert!(!state.is_expanded("a"));
        assert!(state.is_empty());
    }

    #[test]
    fn sorted_is_parent_first() {
        let mut state = ExpansionState::new();
        state.mark("a/b/c");
        state.mark("z");
        state.mark("a");
        state.mark("a/b");
        assert_eq!(state.sorted(), vec!["a", "z", "a/b", "a/b/c"]);
    }
}
