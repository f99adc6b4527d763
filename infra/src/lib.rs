//! # Infrastructure Layer
//!
//! Concrete persistence for the auth service: a SQLx MySQL connection pool
//! and the MySQL implementation of the credential repository.

// Re-export core types for convenience
pub use auth_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::Database(e.to_string()),
            InfrastructureError::Config(message) => DomainError::Config { message },
        }
    }
}
