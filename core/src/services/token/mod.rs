//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - Claim building and HS256 signing
//! - Stateless verification with a pinned algorithm
//! - The in-memory revocation registry and its background sweeper

mod cleanup;
mod config;
mod issuer;
mod revocation;
mod service;
mod verifier;

#[cfg(test)]
mod tests;

pub use cleanup::{RevocationSweeper, SweepResult, SweeperConfig};
pub use config::{TokenServiceConfig, MAX_TTL_MINUTES};
pub use issuer::TokenIssuer;
pub use revocation::RevocationRegistry;
pub use service::TokenService;
pub use verifier::TokenVerifier;
