//! Active-path matching against the filtered tree.
//!
//! Given the current route path, find which entry is active. Matching runs
//! in three passes over the tree, first hit wins:
//!
//! 1. top-level entry whose url equals the path ([`MatchResult::ExactTop`]);
//! 2. sub-item whose url equals the path ([`MatchResult::ExactSub`]);
//! 3. sub-item whose url is a proper prefix of the path at a segment
//!    boundary, for detail/edit/new routes ([`MatchResult::PrefixSub`]).
//!    A sub-item pointing at the dashboard root never prefix-matches.
//!
//! Within a pass the earlier-declared entry wins. Two sub-items sharing a
//! prefix are both eligible and the first one is chosen.
//!
//! Urls and the path are compared after [`normalize_path`].

use crate::filter::FilteredNavEntry;
use crate::logging::{debug_log, trace_log};
use crate::path::{last_segment, normalize_path};

/// Which entry, if any, the current path activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// A top-level entry's url equals the path
    ExactTop { entry: &'a FilteredNavEntry },

    /// A sub-item's url equals the path
    ExactSub {
        parent: &'a FilteredNavEntry,
        sub_entry: &'a FilteredNavEntry,
    },

    /// The path lies below a sub-item's url (e.g. `/dashboard/artists/42/edit`)
    PrefixSub {
        parent: &'a FilteredNavEntry,
        sub_entry: &'a FilteredNavEntry,
        /// Last segment of the path (e.g. `"edit"`)
        trailing_segment: String,
    },

    NoMatch,
}

impl MatchResult<'_> {
    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::ExactTop { .. } => "exact-top",
            MatchResult::ExactSub { .. } => "exact-sub",
            MatchResult::PrefixSub { .. } => "prefix-sub",
            MatchResult::NoMatch => "no-match",
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, MatchResult::NoMatch)
    }

    /// The deepest matched entry.
    pub fn active_entry(&self) -> Option<&FilteredNavEntry> {
        match self {
            MatchResult::ExactTop { entry } => Some(*entry),
            MatchResult::ExactSub { sub_entry, .. } | MatchResult::PrefixSub { sub_entry, .. } => {
                Some(*sub_entry)
            }
            MatchResult::NoMatch => None,
        }
    }
}

fn url_is(entry: &FilteredNavEntry, path: &str) -> bool {
    entry
        .url
        .as_deref()
        .is_some_and(|url| normalize_path(url) == path)
}

fn sub_items(tree: &[FilteredNavEntry]) -> impl Iterator<Item = (&FilteredNavEntry, &FilteredNavEntry)> {
    tree.iter()
        .flat_map(|parent| parent.children.iter().map(move |sub| (parent, sub)))
}

/// Resolve the active entry for `current_path`.
///
/// `dashboard_root` excludes the root entry from prefix matching; otherwise
/// every dashboard path would match it.
///
/// # Example
///
/// ```
/// use dashboard_nav::{filter_tree, match_path, MatchResult, NavTree, Role};
///
/// let tree = filter_tree(NavTree::dashboard().entries(), Some(Role::ArtistManager));
/// match match_path(&tree, "/dashboard/artists/42/edit", "/dashboard") {
///     MatchResult::PrefixSub { sub_entry, trailing_segment, .. } => {
///         assert_eq!(sub_entry.title, "All Artists");
///         assert_eq!(trailing_segment, "edit");
///     }
///     other => panic!("unexpected {other:?}"),
/// }
/// ```
pub fn match_path<'a>(
    tree: &'a [FilteredNavEntry],
    current_path: &str,
    dashboard_root: &str,
) -> MatchResult<'a> {
    let path = normalize_path(current_path);
    let root = normalize_path(dashboard_root);

    let result = match_normalized(tree, &path, &root);
    debug_log!("Path '{}' resolved as {}", path, result.kind());
    result
}

fn match_normalized<'a>(tree: &'a [FilteredNavEntry], path: &str, root: &str) -> MatchResult<'a> {
    if let Some(entry) = tree.iter().find(|entry| url_is(entry, path)) {
        return MatchResult::ExactTop { entry };
    }

    if let Some((parent, sub_entry)) = sub_items(tree).find(|(_, sub)| url_is(sub, path)) {
        return MatchResult::ExactSub { parent, sub_entry };
    }

    for (parent, sub_entry) in sub_items(tree) {
        let Some(url) = sub_entry.url.as_deref() else {
            continue;
        };
        let url = normalize_path(url);
        if url == root || url == "/" {
            continue;
        }

        let below = path
            .strip_prefix(&*url)
            .is_some_and(|rest| rest.starts_with('/'));
        trace_log!("Prefix check '{}' against '{}': {}", path, url, below);

        if below {
            let trailing_segment = last_segment(path).unwrap_or_default().to_string();
            return MatchResult::PrefixSub {
                parent,
                sub_entry,
                trailing_segment,
            };
        }
    }

    MatchResult::NoMatch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_tree;
    use crate::nav::{NavEntry, NavTree};
    use crate::role::Role;

    fn admin_tree() -> Vec<FilteredNavEntry> {
        filter_tree(NavTree::dashboard().entries(), Some(Role::SuperAdmin))
    }

    #[test]
    fn test_exact_top() {
        let tree = admin_tree();
        let result = match_path(&tree, "/dashboard/gallery", "/dashboard");
        assert!(matches!(result, MatchResult::ExactTop { entry } if entry.title == "Gallery"));
    }

    #[test]
    fn test_exact_top_beats_exact_sub() {
        // "Artists" and its child "All Artists" share a url
        let tree = admin_tree();
        let result = match_path(&tree, "/dashboard/artists", "/dashboard");
        assert!(matches!(result, MatchResult::ExactTop { entry } if entry.title == "Artists"));
    }

    #[test]
    fn test_exact_sub() {
        let tree = admin_tree();
        match match_path(&tree, "/dashboard/users", "/dashboard") {
            MatchResult::ExactSub { parent, sub_entry } => {
                assert_eq!(parent.title, "User Management");
                assert_eq!(sub_entry.title, "All Users");
            }
            other => panic!("expected ExactSub, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_sub_beats_prefix_sub() {
        let tree = admin_tree();
        let result = match_path(&tree, "/dashboard/artists/new", "/dashboard");
        assert!(
            matches!(result, MatchResult::ExactSub { sub_entry, .. } if sub_entry.title == "New Artist")
        );
    }

    #[test]
    fn test_prefix_sub_trailing_segment() {
        let tree = admin_tree();
        match match_path(&tree, "/dashboard/users/7/edit", "/dashboard") {
            MatchResult::PrefixSub {
                sub_entry,
                trailing_segment,
                ..
            } => {
                assert_eq!(sub_entry.title, "All Users");
                assert_eq!(trailing_segment, "edit");
            }
            other => panic!("expected PrefixSub, got {other:?}"),
        }
    }

    #[test]
    fn test_prefix_requires_segment_boundary() {
        let tree = admin_tree();
        let result = match_path(&tree, "/dashboard/usersettings", "/dashboard");
        assert_eq!(result, MatchResult::NoMatch);
    }

    #[test]
    fn test_root_sub_item_never_prefix_matches() {
        let tree = filter_tree(
            &[NavEntry::new("Home").child(NavEntry::link("Overview", "/dashboard"))],
            None,
        );
        assert_eq!(
            match_path(&tree, "/dashboard/anything", "/dashboard"),
            MatchResult::NoMatch
        );
    }

    #[test]
    fn test_first_declared_prefix_wins() {
        let tree = filter_tree(
            &[
                NavEntry::new("A").child(NavEntry::link("First", "/dashboard/things")),
                NavEntry::new("B").child(NavEntry::link("Second", "/dashboard/things")),
            ],
            None,
        );
        let result = match_path(&tree, "/dashboard/things/3", "/dashboard");
        assert_eq!(result.active_entry().unwrap().title, "First");
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let tree = admin_tree();
        let result = match_path(&tree, "/dashboard/calendar/", "/dashboard");
        assert_eq!(result.kind(), "exact-top");
    }

    #[test]
    fn test_hidden_entries_do_not_match() {
        let tree = filter_tree(NavTree::dashboard().entries(), Some(Role::Artist));
        assert_eq!(
            match_path(&tree, "/dashboard/users", "/dashboard"),
            MatchResult::NoMatch
        );
    }
}
