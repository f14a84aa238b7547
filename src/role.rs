//! Actor roles and the role resolver.
//!
//! A [`Role`] is read once per page lifecycle from the trust token (the
//! `role` cookie or the access token's `role` claim). [`resolve_role`] turns
//! the raw value into `Option<Role>`; anything unrecognized becomes `None`,
//! which the filter treats as "show nothing restricted".
//!
//! # Examples
//!
//! ```
//! use dashboard_nav::{resolve_role, Role};
//!
//! assert_eq!(resolve_role(Some("artist_manager")), Some(Role::ArtistManager));
//! assert_eq!(resolve_role(Some("admin")), None);
//! assert_eq!(resolve_role(None), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission tier of the current actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Artist,
    ArtistManager,
    SuperAdmin,
}

impl Role {
    /// Every role, in ascending order of privilege.
    pub const ALL: [Role; 3] = [Role::Artist, Role::ArtistManager, Role::SuperAdmin];

    /// Wire value as stored in cookies and token claims.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Artist => "artist",
            Role::ArtistManager => "artist_manager",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw value that is not one of the three role strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {:?}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// Validate a raw trust-token value.
///
/// Pure: absent or unrecognized input yields `None` and nothing is logged.
/// Callers that want an operator warning go through
/// [`Session`](crate::session::Session), which logs on their behalf.
/// Matching is exact and case-sensitive.
pub fn resolve_role(raw: Option<&str>) -> Option<Role> {
    raw.and_then(|value| value.parse().ok())
}
