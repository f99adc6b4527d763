//! Error types for authentication and token operations
//!
//! Every variant is an expected, user-triggerable outcome. The presentation
//! layer decides how much of the distinction reaches the client.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; the two cases are indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    /// The password hasher failed internally
    #[error("Password encoding failed")]
    EncodingError,

    #[error("User not found")]
    NotFound,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token revoked")]
    Revoked,

    #[error("Malformed token")]
    MalformedToken,

    /// The signing key is empty or unusable
    #[error("Token signing failed")]
    SigningError,
}

impl TokenError {
    /// Whether this failure surfaces externally as "invalid token".
    ///
    /// `SigningError` is a server-side fault and is not included.
    pub fn is_invalid_token(&self) -> bool {
        !matches!(self, TokenError::SigningError)
    }
}
