//! Live search over the catalog.
//!
//! Once the query is long enough, the listing is replaced by every catalog
//! entry whose name matches (the listing shows their parents as needed).
//! The shown sequence from before the search is kept and put back as soon as
//! the query gets too short again.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::catalog::Catalog;
use crate::listing::path;
use crate::listing::{SelectionListener, WindowedListing};

/// Default number of characters before filtering kicks in.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// How a query is matched against an item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Case-insensitive substring of the last path segment.
    #[default]
    Substring,
    /// Skim-style fuzzy match on the last path segment.
    Fuzzy,
}

impl SearchMode {
    /// Parse the mode from a config string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "fuzzy" => SearchMode::Fuzzy,
            _ => SearchMode::Substring,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Substring => "substring",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

/// Search box state plus the pre-search snapshot of the listing.
pub struct SearchState {
    pub query: String,
    /// Byte offset of the cursor in `query`.
    pub cursor_position: usize,
    pub mode: SearchMode,
    pub min_query_len: usize,
    /// Number of catalog entries matching the applied query.
    pub match_count: Option<usize>,
    pre_search: Option<Vec<String>>,
    matcher: SkimMatcherV2,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SearchMode::default(), DEFAULT_MIN_QUERY_LEN)
    }
}

impl SearchState {
    pub fn new(mode: SearchMode, min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            cursor_position: 0,
            mode,
            min_query_len: min_query_len.max(1),
            match_count: None,
            pre_search: None,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Whether the listing currently shows search results.
    pub fn is_filtering(&self) -> bool {
        self.pre_search.is_some()
    }

    /// Whether `id`'s name matches `query`.
    pub fn matches(&self, id: &str, query: &str) -> bool {
        let name = path::name_of(id);
        match self.mode {
            SearchMode::Substring => name.to_lowercase().contains(&query.to_lowercase()),
            SearchMode::Fuzzy => self.matcher.fuzzy_match(name, query).is_some(),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        self.query.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if let Some(prev) = self.query[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.query.remove(self.cursor_position);
        }
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.cursor_position = 0;
    }

    /// Bring the listing in line with the current query.
    ///
    /// A long enough query replaces the shown items with all matches (the
    /// first time, the current shown items are remembered). A shorter query
    /// restores the remembered items. Expansion state is reset either way.
    pub async fn apply<L: SelectionListener>(
        &mut self,
        listing: &mut WindowedListing<Catalog, L>,
    ) {
        if self.query.chars().count() >= self.min_query_len {
            if self.pre_search.is_none() {
                self.pre_search = Some(listing.item_ids().to_vec());
            }
            let matches: Vec<String> = listing
                .source()
                .ids()
                .iter()
                .filter(|id| self.matches(id, &self.query))
                .cloned()
                .collect();
            log::debug!("search {:?} matched {} item(s)", self.query, matches.len());
            self.match_count = Some(matches.len());
            listing.update_items(move |_| matches, true).await;
        } else if let Some(snapshot) = self.pre_search.take() {
            self.match_count = None;
            listing.update_items(move |_| snapshot, true).await;
        }
    }
}
