//! Error type for the fallible edges of the crate.
//!
//! The navigation pipeline itself (role resolution, filtering, matching,
//! breadcrumbs) never fails: bad input degrades to a less specific view.
//! Errors only surface where data enters the crate:
//!
//! - loading [`NavConfig`](crate::config::NavConfig) or a
//!   [`NavTree`](crate::nav::NavTree) from TOML/JSON;
//! - decoding an access token into [`AccessClaims`](crate::token::AccessClaims).
//!
//! # Examples
//!
//! ```
//! use dashboard_nav::NavError;
//!
//! let err = NavError::InvalidConfig { message: "dashboard_root must start with '/'".into() };
//! assert_eq!(err.to_string(), "Invalid configuration: dashboard_root must start with '/'");
//! assert!(!err.is_token_error());
//! ```

use std::fmt;

/// Convenience alias used by the fallible loaders.
pub type Result<T, E = NavError> = std::result::Result<T, E>;

/// Everything that can go wrong while loading configuration or decoding a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Configuration text could not be parsed
    ConfigParse {
        /// `"toml"` or `"json"`
        format: &'static str,
        message: String,
    },

    /// Configuration parsed but violates a constraint
    InvalidConfig { message: String },

    /// Access token could not be decoded
    InvalidToken { message: String },

    /// Access token carries an `exp` claim in the past
    ExpiredToken,
}

impl NavError {
    pub(crate) fn toml(err: &toml::de::Error) -> Self {
        NavError::ConfigParse {
            format: "toml",
            message: err.message().to_string(),
        }
    }

    pub(crate) fn json(err: &serde_json::Error) -> Self {
        NavError::ConfigParse {
            format: "json",
            message: err.to_string(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        NavError::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for the two token variants.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            NavError::InvalidToken { .. } | NavError::ExpiredToken
        )
    }
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::ConfigParse { format, message } => {
                write!(f, "Failed to parse {} configuration: {}", format, message)
            }
            NavError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            NavError::InvalidToken { message } => {
                write!(f, "Invalid access token: {}", message)
            }
            NavError::ExpiredToken => write!(f, "Access token expired"),
        }
    }
}

impl std::error::Error for NavError {}

impl From<jsonwebtoken::errors::Error> for NavError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => NavError::ExpiredToken,
            _ => NavError::InvalidToken {
                message: err.to_string(),
            },
        }
    }
}
