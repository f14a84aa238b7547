//! Memoization of derived navigation views.
//!
//! Filtering and breadcrumb derivation are pure, so their results can be
//! reused across renders. [`ViewCache`] keeps two independent LRU caches
//! (via the [`lru`] crate, behind the `cache` feature):
//!
//! - **Tree cache**: role → filtered tree. At most four keys ever exist
//!   (three roles plus anonymous), so this cache effectively never evicts.
//! - **View cache**: `(role, normalized path)` → [`NavView`].
//!
//! [`CacheStats`] counts hits, misses and invalidations.
//!
//! # Examples
//!
//! ```
//! use dashboard_nav::cache::ViewCache;
//! use dashboard_nav::Role;
//!
//! let mut cache = ViewCache::new();
//! assert!(cache.get_tree(Some(Role::Artist)).is_none());
//! cache.put_tree(Some(Role::Artist), Vec::new());
//! assert!(cache.get_tree(Some(Role::Artist)).is_some());
//! assert_eq!(cache.stats().tree_hits, 1);
//! assert_eq!(cache.stats().tree_misses, 1);
//! ```

use crate::filter::FilteredNavEntry;
use crate::logging::{debug_log, trace_log};
use crate::navigator::NavView;
use crate::role::Role;
use lru::LruCache;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ViewKey {
    role: Option<Role>,
    path: String,
}

/// Hit/miss/invalidation counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub tree_hits: usize,
    pub tree_misses: usize,
    pub view_hits: usize,
    pub view_misses: usize,
    /// Number of [`ViewCache::clear`] calls
    pub invalidations: usize,
}

impl CacheStats {
    /// View-cache hit rate in `0.0..=1.0`; `0.0` before any lookup.
    #[allow(clippy::cast_precision_loss)]
    pub fn view_hit_rate(&self) -> f64 {
        let total = self.view_hits + self.view_misses;
        if total == 0 {
            0.0
        } else {
            self.view_hits as f64 / total as f64
        }
    }
}

/// LRU cache for filtered trees and views.
#[derive(Debug)]
pub struct ViewCache {
    trees: LruCache<Option<Role>, Vec<FilteredNavEntry>>,
    views: LruCache<ViewKey, NavView>,
    stats: CacheStats,
}

impl ViewCache {
    pub const DEFAULT_CAPACITY: usize = 256;

    const TREE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(Role::ALL.len() + 1) {
        Some(cap) => cap,
        None => NonZeroUsize::MIN,
    };

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// View-cache capacity; zero falls back to the default.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(Self::DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            trees: LruCache::new(Self::TREE_CAPACITY),
            views: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Drop every entry, e.g. after the tree changed.
    pub fn clear(&mut self) {
        let dropped = self.trees.len() + self.views.len();
        self.trees.clear();
        self.views.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "View cache cleared: {} entries dropped ({} invalidations, view hit rate {:.1}%)",
            dropped,
            self.stats.invalidations,
            self.stats.view_hit_rate() * 100.0
        );
    }

    pub fn get_tree(&mut self, role: Option<Role>) -> Option<Vec<FilteredNavEntry>> {
        if let Some(tree) = self.trees.get(&role) {
            self.stats.tree_hits += 1;
            trace_log!("Tree cache hit for role {:?}", role);
            Some(tree.clone())
        } else {
            self.stats.tree_misses += 1;
            trace_log!("Tree cache miss for role {:?}", role);
            None
        }
    }

    pub fn put_tree(&mut self, role: Option<Role>, tree: Vec<FilteredNavEntry>) {
        self.trees.put(role, tree);
    }

    /// `path` must be normalized.
    pub fn get_view(&mut self, role: Option<Role>, path: &str) -> Option<NavView> {
        let key = ViewKey {
            role,
            path: path.to_string(),
        };
        if let Some(view) = self.views.get(&key) {
            self.stats.view_hits += 1;
            trace_log!("View cache hit for '{}'", path);
            Some(view.clone())
        } else {
            self.stats.view_misses += 1;
            trace_log!("View cache miss for '{}'", path);
            None
        }
    }

    pub fn put_view(&mut self, role: Option<Role>, path: &str, view: NavView) {
        let key = ViewKey {
            role,
            path: path.to_string(),
        };
        self.views.put(key, view);
    }

    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Default for ViewCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breadcrumb::BreadcrumbPart;

    fn view(label: &str) -> NavView {
        NavView {
            items: Vec::new(),
            breadcrumbs: vec![BreadcrumbPart::text(label)],
        }
    }

    #[test]
    fn test_view_keyed_by_role_and_path() {
        let mut cache = ViewCache::new();
        cache.put_view(Some(Role::Artist), "/dashboard", view("A"));

        assert_eq!(cache.get_view(Some(Role::Artist), "/dashboard"), Some(view("A")));
        assert_eq!(cache.get_view(None, "/dashboard"), None);
        assert_eq!(cache.get_view(Some(Role::Artist), "/dashboard/gallery"), None);
        assert_eq!(cache.stats().view_hits, 1);
        assert_eq!(cache.stats().view_misses, 2);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = ViewCache::with_capacity(2);
        cache.put_view(None, "/a", view("a"));
        cache.put_view(None, "/b", view("b"));
        cache.get_view(None, "/a");
        cache.put_view(None, "/c", view("c"));

        assert_eq!(cache.view_count(), 2);
        assert!(cache.get_view(None, "/b").is_none());
        assert!(cache.get_view(None, "/a").is_some());
    }

    #[test]
    fn test_clear_counts_invalidation() {
        let mut cache = ViewCache::new();
        cache.put_tree(None, Vec::new());
        cache.put_view(None, "/a", view("a"));
        cache.clear();

        assert_eq!(cache.tree_count(), 0);
        assert_eq!(cache.view_count(), 0);
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_zero_capacity_falls_back() {
        let mut cache = ViewCache::with_capacity(0);
        cache.put_view(None, "/a", view("a"));
        assert_eq!(cache.view_count(), 1);
    }

    #[test]
    fn test_hit_rate() {
        let mut cache = ViewCache::new();
        assert!((cache.stats().view_hit_rate() - 0.0).abs() < f64::EPSILON);
        cache.get_view(None, "/a");
        cache.put_view(None, "/a", view("a"));
        cache.get_view(None, "/a");
        cache.get_view(None, "/a");
        cache.get_view(None, "/a");
        assert!((cache.stats().view_hit_rate() - 0.75).abs() < 0.001);
    }
}
