//! Per-render pipeline.
//!
//! [`Navigator`] owns the static tree and configuration and turns a
//! `(role, path)` pair into a [`NavView`]: the filtered sidebar plus the
//! breadcrumb trail. It is re-run whenever either input changes; the most
//! recent role and path win.
//!
//! ```text
//! Session ──role──┐
//!                 ├─► filter_tree ─► match_path ─► BreadcrumbBuilder ─► NavView
//! Router ──path───┘
//! ```
//!
//! With the `cache` feature, results are memoized per role and per
//! `(role, path)`. Cached and uncached views are identical.
//!
//! # Example
//!
//! ```
//! use dashboard_nav::{BreadcrumbPart, Navigator, Role};
//!
//! let mut nav = Navigator::dashboard();
//! let view = nav.view(Some(Role::SuperAdmin), "/dashboard/users");
//!
//! assert!(view.items.iter().any(|e| e.title == "User Management"));
//! assert_eq!(view.breadcrumbs.last(), Some(&BreadcrumbPart::text("All Users")));
//! ```

use crate::breadcrumb::{BreadcrumbBuilder, BreadcrumbPart};
use crate::config::NavConfig;
use crate::filter::{filter_tree, FilteredNavEntry};
use crate::logging::debug_log;
use crate::matcher::match_path;
use crate::nav::NavTree;
use crate::path::normalize_path;
use crate::role::Role;
use serde::Serialize;

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, ViewCache};

/// Everything the sidebar and breadcrumb renderers need for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub items: Vec<FilteredNavEntry>,
    pub breadcrumbs: Vec<BreadcrumbPart>,
}

/// Tree + configuration, evaluated per render.
#[derive(Debug)]
pub struct Navigator {
    tree: NavTree,
    config: NavConfig,
    crumbs: BreadcrumbBuilder,
    #[cfg(feature = "cache")]
    cache: ViewCache,
}

impl Navigator {
    pub fn new(tree: NavTree, config: NavConfig) -> Self {
        let crumbs = BreadcrumbBuilder::new(&config);
        #[cfg(feature = "cache")]
        let cache = ViewCache::with_capacity(config.cache_capacity);
        Self {
            tree,
            config,
            crumbs,
            #[cfg(feature = "cache")]
            cache,
        }
    }

    /// The built-in dashboard tree with default configuration.
    pub fn dashboard() -> Self {
        Self::new(NavTree::dashboard(), NavConfig::default())
    }

    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Replace the tree; cached views are dropped.
    pub fn set_tree(&mut self, tree: NavTree) {
        self.tree = tree;
        #[cfg(feature = "cache")]
        self.cache.clear();
    }

    /// Sidebar entries visible to `role`.
    pub fn items(&mut self, role: Option<Role>) -> Vec<FilteredNavEntry> {
        #[cfg(feature = "cache")]
        if let Some(tree) = self.cache.get_tree(role) {
            return tree;
        }

        let tree = filter_tree(self.tree.entries(), role);

        #[cfg(feature = "cache")]
        self.cache.put_tree(role, tree.clone());

        tree
    }

    /// Sidebar and breadcrumbs for `role` at `path`.
    pub fn view(&mut self, role: Option<Role>, path: &str) -> NavView {
        let path = normalize_path(path);

        #[cfg(feature = "cache")]
        if let Some(view) = self.cache.get_view(role, &path) {
            return view;
        }

        let items = self.items(role);
        let view = self.derive(items, &path);

        #[cfg(feature = "cache")]
        self.cache.put_view(role, &path, view.clone());

        view
    }

    /// Uncached evaluation.
    pub fn compute_view(&self, role: Option<Role>, path: &str) -> NavView {
        let path = normalize_path(path);
        self.derive(filter_tree(self.tree.entries(), role), &path)
    }

    fn derive(&self, items: Vec<FilteredNavEntry>, path: &str) -> NavView {
        let result = match_path(&items, path, &self.config.dashboard_root);
        let breadcrumbs = self.crumbs.build(&result, &items, path);
        debug_log!(
            "Derived view for '{}': {} items, {} crumbs",
            path,
            items.len(),
            breadcrumbs.len()
        );
        NavView { items, breadcrumbs }
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> &CacheStats {
        self.cache.stats()
    }
}
