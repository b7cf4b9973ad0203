//! In-memory item catalog: the full, flat list of item IDs the browser can
//! show, and the lookups the listing needs from it.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use crate::error::{ListingError, Result};
use crate::listing::path;
use crate::listing::sequence::dedup_first;
use crate::listing::{ItemLabel, ItemSource, LabelStyle};

/// Every known item ID, indexed by parent.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    ids: Vec<String>,
    known: HashSet<String>,
    /// IDs that have at least one catalog entry below them.
    prefixes: HashSet<String>,
    /// Catalog entries exactly one level below each parent, in catalog order.
    children: HashMap<String, Vec<String>>,
}

/// Starting state for a listing after validation against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialState {
    pub items: Vec<String>,
    pub selected: Option<String>,
}

impl Catalog {
    /// Build a catalog from IDs, dropping repeats.
    pub fn new(ids: Vec<String>) -> Self {
        let ids = dedup_first(ids);
        let known: HashSet<String> = ids.iter().cloned().collect();
        let mut prefixes = HashSet::new();
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut linked: HashSet<String> = HashSet::new();

        for id in &ids {
            let ancestors = path::parents_of(id);
            // Intermediate levels without an entry of their own still show up
            // as children of their parent.
            for node in ancestors.iter().chain(std::iter::once(id)) {
                if let Some(parent) = path::parent_of(node) {
                    if linked.insert(node.clone()) {
                        children
                            .entry(parent.to_string())
                            .or_default()
                            .push(node.clone());
                    }
                }
            }
            prefixes.extend(ancestors);
        }

        Self {
            ids,
            known,
            prefixes,
            children,
        }
    }

    /// Parse one ID per line. Blank lines are skipped.
    pub fn from_lines(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Parse a JSON array of ID strings.
    pub fn from_json(text: &str) -> Result<Self> {
        let ids: Vec<String> = serde_json::from_str(text)?;
        Ok(Self::new(ids))
    }

    /// Load a catalog file; `-` reads stdin. Files ending in `.json` are
    /// parsed as a JSON array, anything else as one ID per line.
    pub fn load(source: &Path) -> Result<Self> {
        let text = if source.as_os_str() == "-" {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        } else {
            std::fs::read_to_string(source).map_err(|e| {
                ListingError::InvalidPath(format!("{}: {}", source.display(), e))
            })?
        };

        let is_json = source
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json(&text)?
        } else {
            Self::from_lines(&text)
        };
        log::info!(
            "loaded {} item(s) from {}",
            catalog.len(),
            source.display()
        );
        Ok(catalog)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Whether some catalog entry lies below `id`.
    pub fn has_children(&self, id: &str) -> bool {
        self.prefixes.contains(id)
    }

    /// Whether `id` is an entry or an ancestor of one.
    pub fn covers(&self, id: &str) -> bool {
        self.contains(id) || self.has_children(id)
    }

    /// Entries exactly one level below `id`.
    pub fn children_of(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First segments of every entry, deduplicated, in catalog order.
    pub fn top_level(&self) -> Vec<String> {
        dedup_first(
            self.ids
                .iter()
                .map(|id| path::top_level_of(id).to_string())
                .collect(),
        )
    }

    /// Validate caller-provided starting state.
    ///
    /// Without stored items the listing starts from the top-level IDs. If
    /// any stored item is unknown, both the items and the selection fall back
    /// to defaults. A selection that is not a catalog entry is dropped.
    pub fn resolve_initial(
        &self,
        stored_items: Option<Vec<String>>,
        stored_selected: Option<String>,
    ) -> InitialState {
        let items = match stored_items {
            None => self.top_level(),
            Some(items) => match items.iter().find(|id| !self.covers(id)) {
                Some(missing) => {
                    log::warn!(
                        "invalid initial items ({missing} does not exist), reverting to top level"
                    );
                    return InitialState {
                        items: self.top_level(),
                        selected: None,
                    };
                }
                None => items,
            },
        };

        let selected = match stored_selected {
            Some(selected) if !self.contains(&selected) => {
                log::warn!("invalid selected item ({selected} does not exist), ignoring");
                None
            }
            other => other,
        };

        InitialState { items, selected }
    }
}

impl ItemSource for Catalog {
    async fn is_expandable(&self, id: &str) -> bool {
        self.has_children(id)
    }

    async fn item_label(&self, id: &str) -> Option<ItemLabel> {
        let style = if self.has_children(id) {
            LabelStyle::Directory
        } else {
            LabelStyle::File
        };
        Some(ItemLabel::new(path::name_of(id), style))
    }

    async fn item_children(&self, id: &str) -> Vec<String> {
        self.children_of(id).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> Catalog {
        Catalog::from_lines(
            "docs\ndocs/readme.md\ndocs/guide/intro.md\nsrc\nsrc/main.rs\n\nREADME.md\nsrc/main.rs\n",
        )
    }

    fn strings(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn from_lines_skips_blanks_and_repeats() {
        let catalog = sample();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.contains("README.md"));
    }

    #[test]
    fn children_are_one_level_down_in_order() {
        let catalog = sample();
        assert_eq!(
            catalog.children_of("docs"),
            strings(&["docs/readme.md", "docs/guide"]).as_slice()
        );
        assert_eq!(
            catalog.children_of("docs/guide"),
            strings(&["docs/guide/intro.md"]).as_slice()
        );
        assert_eq!(catalog.children_of("src"), strings(&["src/main.rs"]).as_slice());
        assert!(catalog.children_of("README.md").is_empty());
        // Not an entry itself, but has entries below it.
        assert!(catalog.has_children("docs/guide"));
        assert!(!catalog.contains("docs/guide"));
        assert!(catalog.covers("docs/guide"));
    }

    #[test]
    fn top_level_is_deduplicated() {
        assert_eq!(sample().top_level(), strings(&["docs", "src", "README.md"]));
    }

    #[test]
    fn from_json_parses_array() {
        let catalog = Catalog::from_json(r#"["a", "a/b", "c"]"#).unwrap();
        assert_eq!(catalog.ids(), strings(&["a", "a/b", "c"]).as_slice());
        assert!(Catalog::from_json("{}").is_err());
    }

    #[test]
    fn load_reads_json_and_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("items.json");
        std::fs::write(&json_path, r#"["x", "x/y"]"#).expect("write");
        assert_eq!(Catalog::load(&json_path).unwrap().len(), 2);

        let list_path = dir.path().join("items.txt");
        let mut f = std::fs::File::create(&list_path).expect("create");
        writeln!(f, "one\ntwo/three\r").expect("write");
        let catalog = Catalog::load(&list_path).unwrap();
        assert_eq!(catalog.ids(), strings(&["one", "two/three"]).as_slice());
    }

    #[test]
    fn load_missing_file_is_invalid_path() {
        let result = Catalog::load(Path::new("/nonexistent/items.txt"));
        assert!(matches!(result, Err(ListingError::InvalidPath(_))));
    }

    #[test]
    fn resolve_defaults_to_top_level() {
        let state = sample().resolve_initial(None, None);
        assert_eq!(state.items, strings(&["docs", "src", "README.md"]));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn resolve_keeps_valid_state() {
        let state = sample().resolve_initial(
            Some(strings(&["docs", "docs/guide", "src"])),
            Some("src/main.rs".to_string()),
        );
        assert_eq!(state.items, strings(&["docs", "docs/guide", "src"]));
        assert_eq!(state.selected.as_deref(), Some("src/main.rs"));
    }

    #[test]
    fn resolve_falls_back_on_unknown_item() {
        let state = sample().resolve_initial(
            Some(strings(&["docs", "gone"])),
            Some("src/main.rs".to_string()),
        );
        assert_eq!(state.items, strings(&["docs", "src", "README.md"]));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn resolve_drops_unknown_selection() {
        let state = sample().resolve_initial(None, Some("docs/guide".to_string()));
        assert_eq!(state.selected, None);
    }

    #[tokio::test]
    async fn item_source_lookups() {
        let catalog = sample();
        assert!(catalog.is_expandable("docs").await);
        assert!(!catalog.is_expandable("README.md").await);
        let label = catalog.item_label("docs/readme.md").await.unwrap();
        assert_eq!(label, ItemLabel::new("readme.md", LabelStyle::File));
        let label = catalog.item_label("src").await.unwrap();
        assert_eq!(label.style, LabelStyle::Directory);
        assert_eq!(
            catalog.item_children("docs").await,
            strings(&["docs/readme.md", "docs/guide"])
        );
    }
}
