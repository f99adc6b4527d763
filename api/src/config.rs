//! Startup configuration for the API binary
//!
//! Reads the typed configuration and refuses combinations that must never
//! reach a running server.

use auth_shared::config::{AppConfig, ConfigError};
use thiserror::Error;

/// Reasons the server refuses to start
#[derive(Debug, Error)]
pub enum StartupConfigError {
    #[error(transparent)]
    Invalid(#[from] ConfigError),

    #[error("JWT_SECRET must be set when running in production")]
    DefaultSecretInProduction,
}

/// Read configuration from the process environment
pub fn load() -> Result<AppConfig, StartupConfigError> {
    let config = AppConfig::from_env()?;
    check(&config)?;
    Ok(config)
}

/// Reject configuration that is only acceptable outside production
pub fn check(config: &AppConfig) -> Result<(), StartupConfigError> {
    if config.auth.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            return Err(StartupConfigError::DefaultSecretInProduction);
        }
        log::warn!("JWT_SECRET is not set, using the development default");
    }
    Ok(())
}
