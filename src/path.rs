//! Path normalization helpers.
//!
//! Entry urls and the current route path are compared after normalization:
//!
//! 1. Empty paths become `"/"`
//! 2. A leading slash is ensured (`"dashboard"` → `"/dashboard"`)
//! 3. Trailing slashes are removed, except for the root
//! 4. Runs of slashes collapse to one (`"//dashboard//artists"` → `"/dashboard/artists"`)
//!
//! [`normalize_path`] returns `Cow<str>` so already-normalized paths, the
//! common case on every render, do not allocate.

use std::borrow::Cow;

/// Normalize a path for comparison.
///
/// # Examples
///
/// ```
/// use dashboard_nav::path::normalize_path;
///
/// assert_eq!(normalize_path("/dashboard"), "/dashboard");
/// assert_eq!(normalize_path("dashboard/artists/"), "/dashboard/artists");
/// assert_eq!(normalize_path("//dashboard//users"), "/dashboard/users");
/// assert_eq!(normalize_path(""), "/");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path == "/" {
        return Cow::Borrowed(path);
    }

    let clean = path.starts_with('/') && !path.ends_with('/') && !path.contains("//");
    if clean {
        return Cow::Borrowed(path);
    }

    let segments = split_path(path);
    if segments.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", segments.join("/")))
    }
}

/// Split a path into its non-empty segments.
///
/// ```
/// use dashboard_nav::path::split_path;
///
/// assert_eq!(split_path("/dashboard/artists/42"), vec!["dashboard", "artists", "42"]);
/// assert!(split_path("/").is_empty());
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Last non-empty segment, if any.
pub fn last_segment(path: &str) -> Option<&str> {
    path.split('/').rev().find(|s| !s.is_empty())
}

/// Segments of `path` below `root`, or `None` when `path` is not strictly
/// nested under it. Both arguments must already be normalized.
///
/// ```
/// use dashboard_nav::path::segments_under;
///
/// assert_eq!(segments_under("/dashboard/users/7", "/dashboard"), Some(vec!["users", "7"]));
/// assert_eq!(segments_under("/dashboard", "/dashboard"), None);
/// assert_eq!(segments_under("/dashboardx", "/dashboard"), None);
/// ```
pub fn segments_under<'a>(path: &'a str, root: &str) -> Option<Vec<&'a str>> {
    let rest = if root == "/" {
        path.strip_prefix('/')?
    } else {
        path.strip_prefix(root)?.strip_prefix('/')?
    };
    let segments = split_path(rest);
    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Join a root and a single segment into a normalized path.
pub fn join(root: &str, segment: &str) -> String {
    if root == "/" {
        format!("/{segment}")
    } else {
        format!("{root}/{segment}")
    }
}
