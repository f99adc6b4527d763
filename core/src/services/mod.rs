//! Business services containing domain logic and use cases.

pub mod auth;
pub mod clock;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, Registration};
pub use clock::{Clock, ManualClock, SystemClock};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{
    RevocationRegistry, RevocationSweeper, SweepResult, SweeperConfig, TokenIssuer, TokenService,
    TokenServiceConfig, TokenVerifier,
};
