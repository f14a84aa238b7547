//! # dashboard-nav
//!
//! Role-gated navigation for the artist-management dashboard: which sidebar
//! entries an actor may see, which one the current route activates, and the
//! breadcrumb trail leading to it.
//!
//! Everything in the pipeline is a pure function of two inputs, the actor's
//! [`Role`] and the current route path:
//!
//! 1. **Role resolution**: [`resolve_role`] / [`Session`] turn the trust
//!    token into `Option<Role>`.
//! 2. **Filtering**: [`filter_tree`] prunes the static [`NavTree`].
//! 3. **Matching**: [`match_path`] finds the active entry.
//! 4. **Breadcrumbs**: [`build_breadcrumbs`] derives the trail.
//!
//! [`Navigator`] runs all four per render. [`access`] holds the route
//! guards that run before a page is served.
//!
//! Nothing in the pipeline fails: an unknown role shows the unrestricted
//! entries only, and an unmatched path still gets a best-effort trail.
//!
//! # Example
//!
//! ```
//! use dashboard_nav::{BreadcrumbPart, Navigator, Session};
//!
//! let session = Session::from_cookie_header("role=artist_manager; name=Jo");
//! let mut nav = Navigator::dashboard();
//! let view = nav.view(session.role, "/dashboard/artists/42/edit");
//!
//! assert_eq!(
//!     view.breadcrumbs,
//!     vec![
//!         BreadcrumbPart::link("Dashboard", "/dashboard"),
//!         BreadcrumbPart::link("Artists", "/dashboard/artists"),
//!         BreadcrumbPart::link("All Artists", "/dashboard/artists"),
//!         BreadcrumbPart::text("Edit"),
//!     ]
//! );
//! ```
//!
//! # Features
//!
//! | Feature   | Default | Effect |
//! |-----------|---------|--------|
//! | `log`     | yes     | Log through the `log` crate |
//! | `tracing` | no      | Log through the `tracing` crate (disable `log`) |
//! | `cache`   | yes     | LRU memoization in [`Navigator`] |

#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(feature = "log", feature = "tracing"))]
compile_error!("features `log` and `tracing` are mutually exclusive");

mod logging;

pub mod access;
pub mod breadcrumb;
#[cfg(feature = "cache")]
#[cfg_attr(docsrs, doc(cfg(feature = "cache")))]
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod nav;
pub mod navigator;
pub mod path;
pub mod role;
pub mod session;
pub mod token;

pub use access::{AccessDecision, AccessPolicy, AccessRequest};
pub use breadcrumb::{build_breadcrumbs, BreadcrumbBuilder, BreadcrumbPart, SegmentLabels};
pub use config::{AccessConfig, NavConfig};
pub use error::NavError;
pub use filter::{filter_entry, filter_tree, FilteredNavEntry, Visibility};
pub use matcher::{match_path, MatchResult};
pub use nav::{NavEntry, NavTree, TreeIssue};
pub use navigator::{NavView, Navigator};
pub use role::{resolve_role, Role};
pub use session::Session;
pub use token::{decode_access_token, AccessClaims};
