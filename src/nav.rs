//! The static navigation tree.
//!
//! A [`NavTree`] is process-wide configuration, built once (in code via the
//! builder methods on [`NavEntry`], or loaded from JSON/TOML) and then
//! filtered per role on every render.
//!
//! # Example
//!
//! ```
//! use dashboard_nav::{NavEntry, NavTree, Role};
//!
//! let tree = NavTree::new(vec![
//!     NavEntry::link("Dashboard", "/dashboard"),
//!     NavEntry::new("User Management")
//!         .roles([Role::SuperAdmin])
//!         .child(NavEntry::link("All Users", "/dashboard/users")),
//! ]);
//!
//! assert_eq!(tree.len(), 2);
//! assert!(tree.lint().is_empty());
//! ```

use crate::error::{NavError, Result};
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// A node in the navigation tree.
///
/// An entry is a leaf (`url`), a group (`children`) or a group with a
/// default landing url (both). An entry with neither is pruned by the filter
/// and reported by [`NavTree::lint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Display label, unique among its siblings
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Icon key for the sidebar renderer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Roles allowed to see this entry; `None` or empty means everyone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<BTreeSet<Role>>,

    #[serde(default, alias = "items", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Create an entry with only a title. Add a url or children before use.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            icon: None,
            roles: None,
            children: Vec::new(),
        }
    }

    /// Create a navigable leaf entry.
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(title).url(url)
    }

    /// Set the target url.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the sidebar icon key.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Restrict visibility to the given roles.
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    /// Append a single child.
    pub fn child(mut self, child: NavEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children, keeping their order.
    pub fn children(mut self, children: impl IntoIterator<Item = NavEntry>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether this entry's own role restriction admits `role`.
    ///
    /// Does not look at ancestors; the filter handles inheritance by never
    /// descending into a hidden parent.
    pub fn admits(&self, role: Option<Role>) -> bool {
        match &self.roles {
            None => true,
            Some(allowed) if allowed.is_empty() => true,
            Some(allowed) => role.is_some_and(|r| allowed.contains(&r)),
        }
    }

    /// True if the entry has neither a url nor any children.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.children.is_empty()
    }
}

/// Problem found by [`NavTree::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeIssue {
    /// Entry with neither url nor children
    Empty { location: String },
    /// Two siblings share a title
    DuplicateTitle { location: String },
    /// Url that does not start with `/`
    RelativeUrl { location: String, url: String },
}

impl fmt::Display for TreeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeIssue::Empty { location } => {
                write!(f, "{location}: entry has neither url nor children")
            }
            TreeIssue::DuplicateTitle { location } => {
                write!(f, "{location}: title is used by an earlier sibling")
            }
            TreeIssue::RelativeUrl { location, url } => {
                write!(f, "{location}: url {url:?} is not absolute")
            }
        }
    }
}

#[derive(Deserialize)]
struct TomlTree {
    #[serde(default)]
    nav: Vec<NavEntry>,
}

/// Ordered list of top-level navigation entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavTree {
    entries: Vec<NavEntry>,
}

impl NavTree {
    pub fn new(entries: Vec<NavEntry>) -> Self {
        Self { entries }
    }

    /// Load a tree from a JSON array of entries.
    ///
    /// ```
    /// use dashboard_nav::NavTree;
    ///
    /// let tree = NavTree::from_json_str(r#"[
    ///     {"title": "Dashboard", "url": "/dashboard"},
    ///     {"title": "Albums", "items": [{"title": "New Album", "url": "/dashboard/albums/new"}]}
    /// ]"#).unwrap();
    /// assert_eq!(tree.entries()[1].children.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| NavError::json(&e))
    }

    /// Load a tree from TOML, one `[[nav]]` table per top-level entry.
    ///
    /// ```
    /// use dashboard_nav::{NavTree, Role};
    ///
    /// let tree = NavTree::from_toml_str(r#"
    ///     [[nav]]
    ///     title = "Dashboard"
    ///     url = "/dashboard"
    ///
    ///     [[nav]]
    ///     title = "User Management"
    ///     roles = ["super_admin"]
    ///
    ///     [[nav.children]]
    ///     title = "All Users"
    ///     url = "/dashboard/users"
    /// "#).unwrap();
    /// assert!(tree.entries()[1].admits(Some(Role::SuperAdmin)));
    /// ```
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let doc: TomlTree = toml::from_str(toml_str).map_err(|e| NavError::toml(&e))?;
        Ok(Self::new(doc.nav))
    }

    /// The sidebar of the artist-management dashboard.
    pub fn dashboard() -> Self {
        let managers = [Role::SuperAdmin, Role::ArtistManager];
        Self::new(vec![
            NavEntry::link("Dashboard", "/dashboard").icon("home"),
            NavEntry::link("Artists", "/dashboard/artists")
                .icon("users")
                .roles(managers)
                .children([
                    NavEntry::link("All Artists", "/dashboard/artists"),
                    NavEntry::link("New Artist", "/dashboard/artists/new"),
                    NavEntry::link("Categories", "/dashboard/artists/categories")
                        .roles([Role::SuperAdmin]),
                ]),
            NavEntry::link("Albums", "/dashboard/albums")
                .icon("music")
                .children([
                    NavEntry::link("Music", "/dashboard/music"),
                    NavEntry::link("New Album", "/dashboard/albums/new"),
                ]),
            NavEntry::link("Gallery", "/dashboard/gallery").icon("image"),
            NavEntry::link("Calendar", "/dashboard/calendar").icon("calendar"),
            NavEntry::new("User Management")
                .icon("users")
                .roles([Role::SuperAdmin])
                .child(NavEntry::link("All Users", "/dashboard/users")),
            NavEntry::link("Settings", "/dashboard/settings").icon("settings"),
        ])
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Report configuration problems the filter would otherwise prune silently.
    pub fn lint(&self) -> Vec<TreeIssue> {
        let mut issues = Vec::new();
        lint_siblings(&self.entries, "", &mut issues);
        issues
    }
}

impl From<Vec<NavEntry>> for NavTree {
    fn from(entries: Vec<NavEntry>) -> Self {
        Self::new(entries)
    }
}

fn lint_siblings(entries: &[NavEntry], prefix: &str, issues: &mut Vec<TreeIssue>) {
    let mut seen = HashSet::new();
    for entry in entries {
        let location = if prefix.is_empty() {
            entry.title.clone()
        } else {
            format!("{prefix} > {}", entry.title)
        };

        if !seen.insert(entry.title.as_str()) {
            issues.push(TreeIssue::DuplicateTitle {
                location: location.clone(),
            });
        }
        if entry.is_empty() {
            issues.push(TreeIssue::Empty {
                location: location.clone(),
            });
        }
        if let Some(url) = entry.url.as_deref().filter(|u| !u.starts_with('/')) {
            issues.push(TreeIssue::RelativeUrl {
                location: location.clone(),
                url: url.to_string(),
            });
        }

        lint_siblings(&entry.children, &location, issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_unrestricted() {
        let entry = NavEntry::link("Gallery", "/dashboard/gallery");
        assert!(entry.admits(None));
        assert!(entry.admits(Some(Role::Artist)));
    }

    #[test]
    fn test_admits_empty_role_set_as_unrestricted() {
        let entry = NavEntry::link("Gallery", "/dashboard/gallery").roles([]);
        assert!(entry.admits(None));
    }

    #[test]
    fn test_admits_restricted() {
        let entry = NavEntry::new("User Management").roles([Role::SuperAdmin]);
        assert!(entry.admits(Some(Role::SuperAdmin)));
        assert!(!entry.admits(Some(Role::Artist)));
        assert!(!entry.admits(None));
    }

    #[test]
    fn test_dashboard_tree_lints_clean() {
        assert!(NavTree::dashboard().lint().is_empty());
    }

    #[test]
    fn test_lint_reports_each_problem() {
        let tree = NavTree::new(vec![
            NavEntry::link("Gallery", "/dashboard/gallery"),
            NavEntry::link("Gallery", "dashboard/gallery"),
            NavEntry::new("Reports").child(NavEntry::new("Empty")),
        ]);

        let issues = tree.lint();
        assert_eq!(
            issues,
            vec![
                TreeIssue::DuplicateTitle {
                    location: "Gallery".into()
                },
                TreeIssue::RelativeUrl {
                    location: "Gallery".into(),
                    url: "dashboard/gallery".into()
                },
                TreeIssue::Empty {
                    location: "Reports > Empty".into()
                },
            ]
        );
        assert_eq!(
            issues[2].to_string(),
            "Reports > Empty: entry has neither url nor children"
        );
    }

    #[test]
    fn test_json_accepts_items_alias_and_roles() {
        let tree = NavTree::from_json_str(
            r#"[{"title": "Artists", "roles": ["artist_manager"],
                 "items": [{"title": "All Artists", "url": "/dashboard/artists"}]}]"#,
        )
        .unwrap();
        let artists = &tree.entries()[0];
        assert_eq!(artists.children[0].title, "All Artists");
        assert!(artists.admits(Some(Role::ArtistManager)));
        assert!(!artists.admits(Some(Role::Artist)));
    }

    #[test]
    fn test_json_rejects_unknown_role() {
        let err = NavTree::from_json_str(r#"[{"title": "X", "url": "/x", "roles": ["admin"]}]"#)
            .unwrap_err();
        assert!(matches!(err, NavError::ConfigParse { format: "json", .. }));
    }

    #[test]
    fn test_toml_parse_error() {
        let err = NavTree::from_toml_str("[[nav]\ntitle = 1").unwrap_err();
        assert!(matches!(err, NavError::ConfigParse { format: "toml", .. }));
    }

    #[test]
    fn test_json_round_trip_keeps_shape() {
        let tree = NavTree::dashboard();
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(NavTree::from_json_str(&json).unwrap(), tree);
    }
}
