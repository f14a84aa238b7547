//! Shared fixtures for integration tests.

#![allow(dead_code)]

use dashboard_nav::*;
use jsonwebtoken::{encode, EncodingKey, Header};

/// Route log output through the test harness (`cargo test -- --nocapture`).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every role input the pipeline can see, anonymous first.
pub fn all_role_inputs() -> Vec<Option<Role>> {
    std::iter::once(None).chain(Role::ALL.map(Some)).collect()
}

/// Paths covering every match variant against the dashboard tree.
pub fn sample_paths() -> Vec<&'static str> {
    vec![
        "/dashboard",
        "/dashboard/",
        "/dashboard/gallery",
        "/dashboard/artists",
        "/dashboard/artists/new",
        "/dashboard/artists/42/edit",
        "/dashboard/users",
        "/dashboard/users/7/edit",
        "/dashboard/albums/new",
        "/dashboard/unknown-section",
        "/dashboard/unknown-section/deeper",
        "/login",
        "/",
        "",
    ]
}

/// Titles of the top-level entries.
pub fn titles(entries: &[FilteredNavEntry]) -> Vec<String> {
    entries.iter().map(|e| e.title.clone()).collect()
}

/// Flatten a filtered tree into `(depth, title)` pairs in traversal order.
pub fn flatten(entries: &[FilteredNavEntry]) -> Vec<(usize, String)> {
    fn walk(entries: &[FilteredNavEntry], depth: usize, out: &mut Vec<(usize, String)>) {
        for entry in entries {
            out.push((depth, entry.title.clone()));
            walk(&entry.children, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(entries, 0, &mut out);
    out
}

/// Same as [`flatten`] for the unfiltered source tree.
pub fn flatten_source(entries: &[NavEntry]) -> Vec<(usize, String)> {
    fn walk(entries: &[NavEntry], depth: usize, out: &mut Vec<(usize, String)>) {
        for entry in entries {
            out.push((depth, entry.title.clone()));
            walk(&entry.children, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(entries, 0, &mut out);
    out
}

/// True if `needle` appears in `haystack` in the same relative order.
pub fn is_subsequence<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|n| rest.any(|h| h == n))
}

/// Breadcrumbs for the dashboard tree under default configuration.
pub fn crumbs(role: Option<Role>, path: &str) -> Vec<BreadcrumbPart> {
    let config = NavConfig::default();
    let tree = filter_tree(NavTree::dashboard().entries(), role);
    let result = match_path(&tree, path, &config.dashboard_root);
    build_breadcrumbs(&result, &tree, path, &config)
}

/// Sign an access token the way the REST API would.
pub fn issue_token(role: Option<&str>, exp_offset_secs: Option<i64>) -> String {
    let claims = AccessClaims {
        role: role.map(str::to_string),
        name: Some("Test User".to_string()),
        exp: exp_offset_secs.map(|offset| chrono::Utc::now().timestamp() + offset),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"api-signing-secret"),
    )
    .expect("token encodes")
}
