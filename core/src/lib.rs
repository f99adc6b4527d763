//! # Auth Core
//!
//! Token lifecycle and revocation for the auth service: password
//! verification, claim building and signing, stateless verification, the
//! revocation registry, and the orchestrator that composes them into
//! register, login, validate and logout.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AuthSession, Claims, IssuedToken, NewUser, Principal, Role, User, UserProfile};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{InMemoryUserRepository, UserRepository};
pub use services::{
    AuthService, BcryptPasswordHasher, Clock, ManualClock, PasswordHasher, Registration,
    RevocationRegistry, RevocationSweeper, SweepResult, SweeperConfig, SystemClock, TokenService,
    TokenServiceConfig,
};
