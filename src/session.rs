//! Session provider.
//!
//! The single place where role and display name are read from the trust
//! token. The application builds one [`Session`] per request or page load
//! and passes `session.role` and the route path into the pipeline as plain
//! arguments; nothing downstream reads cookies itself.
//!
//! # Examples
//!
//! ```
//! use dashboard_nav::{Role, Session};
//!
//! let session = Session::from_cookie_header("role=artist_manager; name=Jane%20Doe");
//! assert_eq!(session.role, Some(Role::ArtistManager));
//! assert_eq!(session.name.as_deref(), Some("Jane Doe"));
//!
//! let anonymous = Session::from_cookie_header("theme=dark");
//! assert!(anonymous.is_anonymous());
//! ```

use crate::logging::warn_log;
use crate::role::{resolve_role, Role};
use crate::token::AccessClaims;
use cookie::Cookie;

/// Cookie holding the role wire value.
pub const ROLE_COOKIE: &str = "role";
/// Cookie holding the display name.
pub const NAME_COOKIE: &str = "name";

/// Who is looking at the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// `None` when the token is missing or carries an unknown role
    pub role: Option<Role>,
    pub name: Option<String>,
}

impl Session {
    /// A session with no role and no name.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from raw trust-token values.
    ///
    /// An unrecognized role is logged and degrades to `None`.
    pub fn from_values(role: Option<&str>, name: Option<&str>) -> Self {
        let resolved = resolve_role(role);
        if let (Some(raw), None) = (role, resolved) {
            warn_log!("Ignoring unrecognized role {:?} from trust token", raw);
        }
        Self {
            role: resolved,
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
        }
    }

    /// Read the `role` and `name` cookies from a `Cookie` request header.
    ///
    /// Malformed pairs are skipped; values are percent-decoded.
    pub fn from_cookie_header(header: &str) -> Self {
        let mut role = None;
        let mut name = None;
        for cookie in Cookie::split_parse_encoded(header).filter_map(|c| c.ok()) {
            match cookie.name() {
                ROLE_COOKIE => role = Some(cookie.value().to_string()),
                NAME_COOKIE => name = Some(cookie.value().to_string()),
                _ => {}
            }
        }
        Self::from_values(role.as_deref(), name.as_deref())
    }

    /// Derive the session from decoded access-token claims.
    pub fn from_claims(claims: &AccessClaims) -> Self {
        Self::from_values(claims.role.as_deref(), claims.name.as_deref())
    }

    pub fn is_anonymous(&self) -> bool {
        self.role.is_none()
    }
}

/// Find a single cookie value in a `Cookie` header.
pub fn cookie_value(header: &str, cookie_name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(|c| c.ok())
        .find(|c| c.name() == cookie_name)
        .map(|c| c.value().to_string())
}
