//! Main token service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::domain::entities::user::Principal;
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;
use super::issuer::TokenIssuer;
use super::revocation::RevocationRegistry;
use super::verifier::TokenVerifier;

/// Issues, verifies and revokes signed bearer tokens
pub struct TokenService {
    config: TokenServiceConfig,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    registry: Arc<RevocationRegistry>,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// Fails with `SigningError` for an empty secret and with a configuration
    /// error for a non-positive ttl.
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        Self::with_registry(config, Arc::new(RevocationRegistry::new()))
    }

    /// Creates a token service backed by an existing registry
    pub fn with_registry(
        config: TokenServiceConfig,
        registry: Arc<RevocationRegistry>,
    ) -> DomainResult<Self> {
        config.validate()?;

        let issuer = TokenIssuer::new(&config.jwt_secret, config.issuer.clone(), config.ttl())?;
        let verifier = TokenVerifier::new(&config.jwt_secret, config.issuer.clone())?;

        Ok(Self {
            config,
            issuer,
            verifier,
            registry,
        })
    }

    /// Issues a token for `principal`, valid from `now` for the configured ttl
    pub fn issue_for(&self, principal: &Principal, now: DateTime<Utc>) -> DomainResult<IssuedToken> {
        Ok(self.issuer.issue(principal, now)?)
    }

    /// Signature, expiry and issuer checks only; ignores revocation
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        Ok(self.verifier.verify(token, now)?)
    }

    /// Full acceptance check: a verified token that has not been revoked
    pub async fn validate(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        let claims = self.verifier.verify(token, now)?;

        if self.registry.is_revoked(&claims.jti, now).await {
            warn!(jti = %claims.jti, "Rejected revoked token");
            return Err(TokenError::Revoked.into());
        }

        Ok(claims)
    }

    /// Revokes a verified token until its own expiry.
    ///
    /// Revoking an already revoked token succeeds again.
    pub async fn revoke(&self, token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        let claims = self.verifier.verify(token, now)?;

        self.registry
            .revoke(&claims.jti, claims.expires_at(), now)
            .await;
        info!(jti = %claims.jti, sub = %claims.sub, "Token revoked");

        Ok(claims)
    }

    pub fn registry(&self) -> Arc<RevocationRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn issuer(&self) -> &str {
        self.verifier.issuer()
    }
}
