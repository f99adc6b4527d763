//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or, ConfigError};

/// Secret used when `JWT_SECRET` is not provided
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared secret for HS256 signing
    pub secret: String,

    /// Issuer claim written into and required from every token
    pub issuer: String,

    /// Token lifetime in minutes
    pub ttl_minutes: i64,

    /// How often expired revocation entries are swept, in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            issuer: String::from("auth-service"),
            ttl_minutes: 60,
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the token lifetime in minutes
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = minutes;
        self
    }

    /// Set the issuer claim
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_minutes.saturating_mul(60)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            secret: env_opt("JWT_SECRET").unwrap_or(defaults.secret),
            issuer: env_opt("JWT_ISSUER").unwrap_or(defaults.issuer),
            ttl_minutes: env_or("JWT_TTL_MINUTES", defaults.ttl_minutes)?,
            sweep_interval_seconds: env_or(
                "REVOCATION_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            )?,
        })
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

impl PasswordConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bcrypt_cost: env_or("BCRYPT_COST", Self::default().bcrypt_cost)?,
        })
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie carrying the token
    pub name: String,

    /// Cookie domain, host-only when unset
    #[serde(default)]
    pub domain: Option<String>,

    /// Cookie path
    pub path: String,

    /// Send only over HTTPS
    pub secure: bool,

    /// Hide the cookie from scripts
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("jwt"),
            domain: None,
            path: String::from("/"),
            secure: false, // Set to true in production
            http_only: default_http_only(),
        }
    }
}

impl CookieConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            domain: env_opt("COOKIE_DOMAIN"),
            secure: env_or("COOKIE_SECURE", defaults.secure)?,
            ..defaults
        })
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            password: PasswordConfig::from_env()?,
            cookie: CookieConfig::from_env()?,
        })
    }
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_http_only() -> bool {
    true
}
