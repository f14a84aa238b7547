//! Access-token claims.
//!
//! The dashboard reads its role and display name from the JWT stored in the
//! access cookie. Only the claims are read here: the signature is checked by
//! the REST API that issued the token, so this side never holds the secret.
//!
//! An `exp` claim, when present, must not be in the past (no leeway). A
//! token without `exp` is accepted.

use crate::error::Result;
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Claims the dashboard cares about. Unknown claims are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiry as seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

fn claims_only_validation() -> Validation {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.required_spec_claims = HashSet::new();
    validation.validate_aud = false;
    validation.validate_exp = true;
    validation.leeway = 0;
    validation
}

/// Decode the claims of an access token.
///
/// Fails with [`NavError::ExpiredToken`](crate::NavError::ExpiredToken) when
/// `exp` has passed and [`NavError::InvalidToken`](crate::NavError::InvalidToken)
/// when the token is not a decodable JWT.
pub fn decode_access_token(token: &str) -> Result<AccessClaims> {
    let data = jsonwebtoken::decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(&[]),
        &claims_only_validation(),
    )?;
    Ok(data.claims)
}
