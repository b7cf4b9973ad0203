//! Path interpretation of item IDs.
//!
//! An item ID is an opaque string whose `/`-separated segments describe its
//! position in the hierarchy. Nothing here validates IDs: empty segments and
//! leading or trailing slashes are passed through verbatim.

/// Hierarchy delimiter inside item IDs.
pub const DELIMITER: char = '/';

/// Number of path segments in `id`.
pub fn depth_of(id: &str) -> usize {
    id.split(DELIMITER).count()
}

/// Ancestor chain of `id`, root first, nearest parent last.
///
/// `"a/b/c"` yields `["a", "a/b"]`; a top-level ID yields nothing.
pub fn parents_of(id: &str) -> Vec<String> {
    id.match_indices(DELIMITER)
        .map(|(idx, _)| id[..idx].to_string())
        .collect()
}

/// Whether `id` lies strictly below `ancestor`.
pub fn is_descendant(id: &str, ancestor: &str) -> bool {
    id.len() > ancestor.len()
        && id.starts_with(ancestor)
        && id[ancestor.len()..].starts_with(DELIMITER)
}

/// Immediate parent of `id`, if it has one.
pub fn parent_of(id: &str) -> Option<&str> {
    id.rfind(DELIMITER).map(|idx| &id[..idx])
}

/// Last segment of `id`.
pub fn name_of(id: &str) -> &str {
    id.rsplit(DELIMITER).next().unwrap_or(id)
}

/// First segment of `id`.
pub fn top_level_of(id: &str) -> &str {
    id.split(DELIMITER).next().unwrap_or(id)
}
