//! Token issuance: claim building plus HS256 signing.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::error;

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::domain::entities::user::Principal;
use crate::errors::TokenError;

/// Signs claim sets with a shared secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates an issuer; an empty secret is unusable.
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::SigningError);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            issuer: issuer.into(),
            ttl,
        })
    }

    /// Builds fresh claims for `principal` and signs them
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = Claims::build(principal, &self.issuer, now, self.ttl);
        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, claims })
    }

    /// Signs `claims` as-is. Same claims and key always give the same token.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign token: {}", e);
            TokenError::SigningError
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
