//! The ordered sequence of shown item IDs and its structural edits.

use std::collections::HashSet;

use super::expansion::ExpansionState;
use super::path;

/// Ordered, deduplicated list of the item IDs currently eligible for rendering.
///
/// Order is render order, top to bottom. Every mutation leaves the sequence
/// free of duplicates (the first occurrence of an ID wins).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShownItemSequence {
    ids: Vec<String>,
}

impl ShownItemSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence over `ids`, dropping repeated IDs.
    pub fn from_ids(ids: Vec<String>) -> Self {
        Self {
            ids: dedup_first(ids),
        }
    }

    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|shown| shown == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Replace the whole sequence, dropping repeated IDs.
    pub fn replace(&mut self, ids: Vec<String>) {
        self.ids = dedup_first(ids);
    }

    /// Splice `children` right after `parent`.
    ///
    /// Children that are already shown keep their earlier position. Returns
    /// `false` without touching anything if `parent` is not shown.
    pub fn insert_after(&mut self, parent: &str, children: &[String]) -> bool {
        let Some(idx) = self.position(parent) else {
            return false;
        };
        let mut ids = Vec::with_capacity(self.ids.len() + children.len());
        ids.extend_from_slice(&self.ids[..=idx]);
        ids.extend(children.iter().cloned());
        ids.extend_from_slice(&self.ids[idx + 1..]);
        self.ids = dedup_first(ids);
        true
    }

    /// Remove every shown descendant of `ancestor`. Returns how many went.
    pub fn remove_descendants(&mut self, ancestor: &str) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| !path::is_descendant(id, ancestor));
        before - self.ids.len()
    }

    /// Make every shown item's ancestors shown and expanded.
    ///
    /// Items are visited in order. For each one, its ancestors are marked
    /// expanded root first, and any ancestor missing from the whole sequence
    /// is inserted directly above the item. An ancestor that is already shown
    /// further down keeps its place.
    pub fn repair_ancestors(&mut self, expansion: &mut ExpansionState) -> usize {
        let mut present: HashSet<String> = self.ids.iter().cloned().collect();
        let mut repaired = Vec::with_capacity(self.ids.len());
        let mut inserted = 0;

        for id in self.ids.drain(..) {
            for parent in path::parents_of(&id) {
                expansion.mark(&parent);
                if present.insert(parent.clone()) {
                    repaired.push(parent);
                    inserted += 1;
                }
            }
            repaired.push(id);
        }

        self.ids = repaired;
        inserted
    }
}

/// Drop repeated IDs, keeping the first occurrence of each.
pub fn dedup_first(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seq(ids: &[&str]) -> ShownItemSequence {
        let mut s = ShownItemSequence::new();
        s.replace(ids.iter().map(|id| id.to_string()).collect());
        s
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn replace_deduplicates_keeping_first() {
        let s = seq(&["b", "a", "b", "c", "a"]);
        assert_eq!(s.as_slice(), strings(&["b", "a", "c"]).as_slice());
    }

    #[test]
    fn insert_after_splices_children() {
        let mut s = seq(&["docs", "src"]);
        assert!(s.insert_after("docs", &strings(&["docs/a.md", "docs/b.md"])));
        assert_eq!(
            s.as_slice(),
            strings(&["docs", "docs/a.md", "docs/b.md", "src"]).as_slice()
        );
    }

    #[test]
    fn insert_after_missing_parent_is_noop() {
        let mut s = seq(&["docs", "src"]);
        assert!(!s.insert_after("gone", &strings(&["gone/x"])));
        assert_eq!(s.as_slice(), strings(&["docs", "src"]).as_slice());
    }

    #[test]
    fn insert_after_keeps_existing_child_position() {
        let mut s = seq(&["docs", "docs/a.md", "src"]);
        s.insert_after("docs", &strings(&["docs/a.md", "docs/b.md"]));
        assert_eq!(
            s.as_slice(),
            strings(&["docs", "docs/a.md", "docs/b.md", "src"]).as_slice()
        );
    }

    #[test]
    fn remove_descendants_uses_delimiter_prefix() {
        let mut s = seq(&["docs", "docs/a", "docs/a/b", "docsx", "src"]);
        assert_eq!(s.remove_descendants("docs"), 2);
        assert_eq!(s.as_slice(), strings(&["docs", "docsx", "src"]).as_slice());
    }

    #[test]
    fn repair_inserts_missing_ancestors_above_item() {
        let mut expansion = ExpansionState::new();
        let mut s = seq(&["x", "a/b/c.txt"]);
        let inserted = s.repair_ancestors(&mut expansion);
        assert_eq!(inserted, 2);
        assert_eq!(
            s.as_slice(),
            strings(&["x", "a", "a/b", "a/b/c.txt"]).as_slice()
        );
        assert!(expansion.is_expanded("a"));
        assert!(expansion.is_expanded("a/b"));
        assert!(!expansion.is_expanded("x"));
    }

    #[test]
    fn repair_shares_ancestors_between_siblings() {
        let mut expansion = ExpansionState::new();
        let mut s = seq(&["a/one", "a/two"]);
        s.repair_ancestors(&mut expansion);
        assert_eq!(s.as_slice(), strings(&["a", "a/one", "a/two"]).as_slice());
    }

    #[test]
    fn repair_leaves_later_ancestor_in_place() {
        let mut expansion = ExpansionState::new();
        let mut s = seq(&["a/b", "a"]);
        assert_eq!(s.repair_ancestors(&mut expansion), 0);
        assert_eq!(s.as_slice(), strings(&["a/b", "a"]).as_slice());
        assert!(expansion.is_expanded("a"));
    }

    fn arb_id() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..4)
            .prop_map(|parts| parts.join("/"))
    }

    proptest! {
        #[test]
        fn repair_never_duplicates(ids in prop::collection::vec(arb_id(), 0..24)) {
            let mut expansion = ExpansionState::new();
            let mut s = ShownItemSequence::new();
            s.replace(ids);
            s.repair_ancestors(&mut expansion);
            let unique: HashSet<&String> = s.as_slice().iter().collect();
            prop_assert_eq!(unique.len(), s.len());
        }

        #[test]
        fn repair_shows_every_ancestor(ids in prop::collection::vec(arb_id(), 0..24)) {
            let mut expansion = ExpansionState::new();
            let mut s = ShownItemSequence::new();
            s.replace(ids);
            s.repair_ancestors(&mut expansion);
            for id in s.as_slice() {
                for parent in path::parents_of(id) {
                    prop_assert!(s.contains(&parent));
                    prop_assert!(expansion.is_expanded(&parent));
                }
            }
        }
    }
}
