//! Configuration for the token service

use auth_shared::config::JwtConfig;
use chrono::Duration;

use crate::errors::{DomainError, DomainResult, TokenError};

/// Longest accepted token lifetime, one year
pub const MAX_TTL_MINUTES: i64 = 366 * 24 * 60;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Issuer written into and required from every token
    pub issuer: String,
    /// Token lifetime in minutes
    pub ttl_minutes: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            ttl_minutes: jwt.ttl_minutes,
        }
    }
}

impl TokenServiceConfig {
    /// Token lifetime, clamped to `MAX_TTL_MINUTES`
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.ttl_minutes.min(MAX_TTL_MINUTES))
    }

    /// Rejects configurations that could never issue a usable token
    pub fn validate(&self) -> DomainResult<()> {
        if self.jwt_secret.is_empty() {
            return Err(TokenError::SigningError.into());
        }
        if self.ttl_minutes <= 0 {
            return Err(DomainError::Config {
                message: format!("token ttl must be positive, got {} minutes", self.ttl_minutes),
            });
        }
        if self.ttl_minutes > MAX_TTL_MINUTES {
            return Err(DomainError::Config {
                message: format!(
                    "token ttl must be at most {} minutes, got {}",
                    MAX_TTL_MINUTES, self.ttl_minutes
                ),
            });
        }
        Ok(())
    }
}
