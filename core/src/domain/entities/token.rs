//! Token claims for signed bearer tokens.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{Principal, Role};
use crate::errors::TokenError;

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: String,

    /// Principal email
    pub email: String,

    /// Principal display name
    pub name: String,

    /// Principal role
    pub role: Role,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp (seconds)
    pub iat: i64,

    /// Expiration timestamp (seconds)
    pub exp: i64,

    /// JWT ID, unique per issued token and used as the revocation key
    pub jti: String,
}

impl Claims {
    /// Builds the claim set for `principal`, valid from `now` for `ttl`.
    ///
    /// Timestamps are truncated to whole seconds, so `exp - iat` is always
    /// exactly the ttl in seconds.
    pub fn build(principal: &Principal, issuer: &str, now: DateTime<Utc>, ttl: Duration) -> Self {
        let iat = now.timestamp();
        Self {
            sub: principal.id.to_string(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            role: principal.role,
            iss: issuer.to_string(),
            iat,
            exp: iat.saturating_add(ttl.num_seconds()),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The principal id carried in `sub`
    pub fn principal_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::MalformedToken)
    }

    /// Reconstructs the principal the token speaks for
    pub fn principal(&self) -> Result<Principal, TokenError> {
        Ok(Principal {
            id: self.principal_id()?,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        })
    }

    /// Checks expiry at `now`; a token is dead from `exp` onwards
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }
}

/// Out-of-range timestamps saturate toward the side they overflowed on
fn timestamp_to_datetime(seconds: i64) -> DateTime<Utc> {
    match DateTime::from_timestamp(seconds, 0) {
        Some(datetime) => datetime,
        None if seconds > 0 => DateTime::<Utc>::MAX_UTC,
        None => DateTime::<Utc>::MIN_UTC,
    }
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact `header.claims.signature` string
    pub token: String,

    pub claims: Claims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at()
    }
}
