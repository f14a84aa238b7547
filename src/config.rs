//! Runtime configuration.
//!
//! [`NavConfig`] holds everything the pipeline needs besides the tree, role
//! and path: where the dashboard lives, fixed crumb labels, the segment
//! label table, cache sizing, and the access-guard paths. Every field has a
//! default matching the artist-management dashboard, so an empty TOML
//! document is a valid configuration.
//!
//! ```
//! use dashboard_nav::NavConfig;
//!
//! let config = NavConfig::from_toml_str(r#"
//!     dashboard_root = "/admin"
//!
//!     [segment_labels]
//!     categories = "Categories"
//!
//!     [access]
//!     guest_only_paths = ["/login"]
//! "#).unwrap();
//!
//! assert_eq!(config.dashboard_root, "/admin");
//! assert_eq!(config.root_label, "Dashboard");
//! assert_eq!(config.access.guest_only_paths, vec!["/login".to_string()]);
//! ```

use crate::error::{NavError, Result};
use crate::role::Role;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Landing path of the dashboard; root of every breadcrumb trail
    pub dashboard_root: String,
    /// Label of the first crumb
    pub root_label: String,
    /// Single crumb shown for paths outside the dashboard
    pub fallback_label: String,
    /// Extra segment labels, merged over the built-in `edit`/`new`
    pub segment_labels: BTreeMap<String, String>,
    /// Entries per view cache (feature `cache`)
    pub cache_capacity: usize,
    pub access: AccessConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            dashboard_root: "/dashboard".to_string(),
            root_label: "Dashboard".to_string(),
            fallback_label: "Page".to_string(),
            segment_labels: BTreeMap::new(),
            cache_capacity: 256,
            access: AccessConfig::default(),
        }
    }
}

impl NavConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(toml_str).map_err(|e| NavError::toml(&e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let absolute = [
            ("dashboard_root", &self.dashboard_root),
            ("access.login_path", &self.access.login_path),
            (
                "access.permission_denied_path",
                &self.access.permission_denied_path,
            ),
            ("access.protected_prefix", &self.access.protected_prefix),
        ];
        for (name, value) in absolute {
            if !value.starts_with('/') {
                return Err(NavError::invalid_config(format!(
                    "{name} must start with '/', got {value:?}"
                )));
            }
        }
        if self.cache_capacity == 0 {
            return Err(NavError::invalid_config("cache_capacity must be non-zero"));
        }
        if self.access.access_cookie.is_empty() {
            return Err(NavError::invalid_config("access.access_cookie must not be empty"));
        }
        Ok(())
    }
}

/// Paths and names used by the route access guards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub login_path: String,
    pub permission_denied_path: String,
    /// Pages a signed-in user is bounced away from
    pub guest_only_paths: Vec<String>,
    /// Paths at or below this prefix require a valid token
    pub protected_prefix: String,
    /// Cookie holding the access token
    pub access_cookie: String,
    pub allowed_roles: Vec<Role>,
    /// Query parameter carrying the originally requested path to the login page
    pub redirect_param: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            permission_denied_path: "/permission-denied".to_string(),
            guest_only_paths: vec!["/login".to_string(), "/signup".to_string()],
            protected_prefix: "/dashboard".to_string(),
            access_cookie: "Access".to_string(),
            allowed_roles: Role::ALL.to_vec(),
            redirect_param: "redirectedFrom".to_string(),
        }
    }
}
