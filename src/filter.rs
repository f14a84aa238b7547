//! Role-based pruning of the navigation tree.
//!
//! Each entry is reduced to a [`Visibility`]: either a [`FilteredNavEntry`]
//! carrying only its visible children, or `Hidden`. The rules, applied
//! recursively:
//!
//! 1. An entry whose role restriction does not admit the role is hidden, and
//!    its children are never looked at.
//! 2. A visible entry with visible children stays a group.
//! 3. A visible entry left with no visible children degrades to a leaf if it
//!    has a url, and is hidden otherwise.
//! 4. Sibling order is preserved at every level.
//!
//! With `role == None` only unrestricted entries survive.

use crate::logging::debug_log;
use crate::nav::NavEntry;
use crate::role::Role;
use serde::Serialize;

/// An entry as the sidebar renderer sees it: role data resolved away and
/// only visible children kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredNavEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FilteredNavEntry>,
}

impl FilteredNavEntry {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Find a direct child by title.
    pub fn child(&self, title: &str) -> Option<&FilteredNavEntry> {
        self.children.iter().find(|c| c.title == title)
    }
}

/// Outcome of filtering a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Visible(FilteredNavEntry),
    Hidden,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible(_))
    }

    pub fn into_entry(self) -> Option<FilteredNavEntry> {
        match self {
            Visibility::Visible(entry) => Some(entry),
            Visibility::Hidden => None,
        }
    }
}

/// Filter one entry (and its subtree) for `role`.
pub fn filter_entry(entry: &NavEntry, role: Option<Role>) -> Visibility {
    if !entry.admits(role) {
        debug_log!(
            "Hiding '{}' for role {}",
            entry.title,
            role.map_or("<none>", Role::as_str)
        );
        return Visibility::Hidden;
    }

    let children = filter_tree(&entry.children, role);

    if children.is_empty() && entry.url.is_none() {
        debug_log!("Pruning '{}': no url and no visible children", entry.title);
        return Visibility::Hidden;
    }

    Visibility::Visible(FilteredNavEntry {
        title: entry.title.clone(),
        url: entry.url.clone(),
        icon: entry.icon.clone(),
        children,
    })
}

/// Filter a list of sibling entries, preserving order.
///
/// # Example
///
/// ```
/// use dashboard_nav::{filter_tree, NavTree, Role};
///
/// let tree = NavTree::dashboard();
/// let artist_view = filter_tree(tree.entries(), Some(Role::Artist));
/// assert!(artist_view.iter().all(|e| e.title != "User Management"));
/// ```
pub fn filter_tree(entries: &[NavEntry], role: Option<Role>) -> Vec<FilteredNavEntry> {
    entries
        .iter()
        .filter_map(|entry| filter_entry(entry, role).into_entry())
        .collect()
}
